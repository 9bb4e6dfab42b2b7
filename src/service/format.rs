/// 千分位分组并保留固定小数位; 缺失值显示为 0
///
/// 按二进制浮点的精确值舍入, 恰好居中时取偶数 (2.5 -> 2, 2.675 -> 2.67)
pub fn format_grouped(value: Option<f64>, scale: usize) -> String {
    let Some(value) = value else {
        return zero(scale);
    };

    let rounded = format!("{:.*}", scale, value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// 数量: 整数显示
pub fn format_quantity(value: Option<f64>) -> String {
    format_grouped(value, 0)
}

/// 单价 / 小计 / 税额 / 金额: 两位小数
pub fn format_money(value: Option<f64>) -> String {
    format_grouped(value, 2)
}

fn zero(scale: usize) -> String {
    if scale > 0 {
        format!("0.{}", "0".repeat(scale))
    } else {
        "0".to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
