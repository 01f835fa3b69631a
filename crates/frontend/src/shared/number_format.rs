//! Утилиты форматирования чисел

/// Форматирует число с разделителем тысяч (пробел) и указанным количеством знаков после запятой
///
/// `1234.567` с двумя знаками даёт `"1 234.57"`.
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // Пробел каждые 3 цифры с конца целой части
    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(' ');
        }
        result.push(c);
    }
    let formatted_integer: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Сумма в рублях без копеек: `15000.0` -> `"15 000 ₽"`
pub fn format_rubles(value: f64) -> String {
    format!("{} ₽", format_number_with_decimals(value, 0))
}

/// Коэффициент позиции в процентах; отсутствующий показывается как `0%`
pub fn format_coefficient(coefficient: Option<f64>) -> String {
    match coefficient {
        None => "0%".to_string(),
        Some(c) if c.fract() == 0.0 => format!("{:.0}%", c),
        Some(c) => format!("{:.1}%", c),
    }
}

/// Значение персонального индекса
pub fn format_cpi(value: f64) -> String {
    format!("{:.2}%", value)
}
