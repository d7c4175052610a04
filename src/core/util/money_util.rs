pub struct MoneyUtil;

impl MoneyUtil {
    pub const MINOR_PER_RUPEE: i64 = 100;

    /// `123456` → `"₹1234.56"`, `-5` → `"-₹0.05"`.
    #[inline]
    pub fn format_inr(minor: i64) -> String {
        let sign = if minor < 0 { "-" } else { "" };
        let abs = minor.unsigned_abs();
        let per = Self::MINOR_PER_RUPEE as u64;
        format!("{}₹{}.{:02}", sign, abs / per, abs % per)
    }

    /// Share of `part` in `whole` as a percentage, 0 when `whole` is 0.
    #[inline]
    pub fn percent_of(part: i64, whole: i64) -> f64 {
        if whole == 0 {
            0.0
        } else {
            (part as f64 / whole as f64) * 100.0
        }
    }
}
