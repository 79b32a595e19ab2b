/// Renders a value with one decimal and a comma as decimal separator, the way
/// Swedish readers expect it: `2.35` becomes `"2,4"`.
pub fn format_decimal(value: f64) -> String {
    format!("{:.1}", value).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(2.3333), "2,3");
        assert_eq!(format_decimal(4.1), "4,1");
        assert_eq!(format_decimal(10.0), "10,0");
        assert_eq!(format_decimal(-3.46), "-3,5");
        assert_eq!(format_decimal(0.0), "0,0");
    }
}
