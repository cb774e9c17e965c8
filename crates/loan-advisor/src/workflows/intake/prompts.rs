use super::domain::{IntakeStep, Profile};

pub const HELP: &str =
    "Напишите “сброс”, чтобы начать заново, или “ещё”, чтобы обновить предложения.";
pub const REFRESHED: &str = "Обновил список предложений.";
pub const RECOVERY: &str = "Ошибка сервера. Напишите “сброс” и попробуйте снова.";

/// Question asked when the conversation arrives at `step`.
pub fn question(step: IntakeStep) -> &'static str {
    match step {
        IntakeStep::LoanType => {
            "Привет! Выберите тип кредита: наличными / авто / ипотека / рефинанс"
        }
        IntakeStep::Age => "Сколько вам лет?",
        IntakeStep::Income => "Какой у вас ежемесячный доход (в рублях, после налогов)?",
        IntakeStep::EmploymentMonths => "Какой стаж на текущем месте работы (в месяцах)?",
        IntakeStep::CreditHistory => "Как оцените кредитную историю? (хорошо / средне / плохо)",
        IntakeStep::Insurance => "Страховка подключается? (да / нет)",
        IntakeStep::DesiredAmount => "Какую сумму хотите? (в рублях)",
        IntakeStep::DesiredMonths => "На какой срок? (в месяцах)",
        IntakeStep::OffersShown => HELP,
    }
}

/// Hint repeated when the answer for `step` does not validate.
pub fn correction(step: IntakeStep) -> &'static str {
    match step {
        IntakeStep::LoanType => "Напишите один из вариантов: наличными / авто / ипотека / рефинанс",
        IntakeStep::Age => "Введите возраст числом (например 29).",
        IntakeStep::Income => "Введите доход числом (например 85000).",
        IntakeStep::EmploymentMonths => "Введите стаж числом в месяцах (например 18).",
        IntakeStep::CreditHistory => "Напишите: хорошо / средне / плохо",
        IntakeStep::Insurance => "Ответьте “да” или “нет”.",
        IntakeStep::DesiredAmount => "Введите сумму числом (например 300000).",
        IntakeStep::DesiredMonths => "Введите срок числом в месяцах (например 24).",
        IntakeStep::OffersShown => HELP,
    }
}

/// Closing message shown alongside the first batch of offers.
pub fn summary(profile: &Profile) -> String {
    let loan_type = profile
        .loan_type
        .map(|loan_type| loan_type.label())
        .unwrap_or_default();
    let amount = format_rubles(profile.desired_amount.unwrap_or_default());
    let months = profile.desired_months.unwrap_or_default();

    format!(
        "Тип кредита: {loan_type}.\n\
         Сумма: {amount} • Срок: {months} мес.\n\n\
         Показал предложения с цифрами и ссылкой на первоисточник.\n\
         Платёж рассчитан по минимальной ставке из диапазона (если банк её публикует)."
    )
}

/// Whole rubles with `ru-RU` digit grouping, e.g. `1 250 000 ₽`.
pub fn format_rubles(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(digit);
    }

    grouped.push_str("\u{a0}₽");
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::offers::LoanType;

    #[test]
    fn formats_rubles_with_grouping() {
        assert_eq!(format_rubles(0), "0\u{a0}₽");
        assert_eq!(format_rubles(999), "999\u{a0}₽");
        assert_eq!(format_rubles(1000), "1\u{a0}000\u{a0}₽");
        assert_eq!(format_rubles(500_000), "500\u{a0}000\u{a0}₽");
        assert_eq!(format_rubles(12_345_678), "12\u{a0}345\u{a0}678\u{a0}₽");
    }

    #[test]
    fn summary_names_type_amount_and_term() {
        let profile = Profile {
            loan_type: Some(LoanType::Auto),
            desired_amount: Some(1_200_000),
            desired_months: Some(60),
            ..Profile::default()
        };
        let text = summary(&profile);
        assert!(text.starts_with("Тип кредита: Авто.\n"));
        assert!(text.contains("Сумма: 1\u{a0}200\u{a0}000\u{a0}₽ • Срок: 60 мес."));
    }

    #[test]
    fn every_question_has_distinct_correction() {
        for step in IntakeStep::QUESTIONS {
            assert_ne!(question(step), correction(step));
        }
    }
}
