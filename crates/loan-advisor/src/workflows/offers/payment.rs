/// Fixed monthly payment that fully repays `principal` over `term_months` at `annual_rate`.
///
/// `annual_rate` is a fraction (`0.12` for 12 %). A non-positive rate falls back to an
/// interest-free straight-line split. Callers guarantee `term_months >= 1`.
pub fn amortized_payment(principal: f64, annual_rate: f64, term_months: u64) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let months = term_months as f64;

    if monthly_rate <= 0.0 {
        return principal / months;
    }

    let growth = (1.0 + monthly_rate).powf(months);
    principal * monthly_rate * growth / (growth - 1.0)
}
