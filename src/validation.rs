use once_cell::sync::Lazy;
use regex::Regex;

/// Team slots that have not been resolved yet hold a placeholder naming the
/// match (or group) that will fill them, e.g. `BMA1勝者` or `A組1位`.
pub fn is_placeholder(team: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(勝者|敗者|組1位)$").unwrap());
    RE.is_match(team)
}

pub fn is_valid_class_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("クラス名を指定してください".to_string());
    }
    if name.chars().count() > 32 {
        return Err("クラス名が長すぎます".to_string());
    }
    if is_placeholder(name) {
        return Err("未確定のチーム名は指定できません".to_string());
    }
    Ok(())
}

/// Highest score accepted for any single entry. Keeps every total well
/// inside `i64`.
pub const MAX_SCORE: i64 = 999;

pub fn is_valid_score(score: i64) -> Result<(), String> {
    if score < 0 {
        return Err("スコアは0以上で入力してください".to_string());
    }
    if score > MAX_SCORE {
        return Err(format!("スコアは{MAX_SCORE}以下で入力してください"));
    }
    Ok(())
}

#[cfg(test)]
#[test]
fn test_placeholders() {
    assert!(is_placeholder("BMA1勝者"));
    assert!(is_placeholder("TUB9敗者"));
    assert!(is_placeholder("A組1位"));
    assert!(!is_placeholder("1-5"));
    assert!(!is_placeholder("教職員"));
}

#[cfg(test)]
#[test]
fn test_class_names() {
    assert!(is_valid_class_name("2-4").is_ok());
    assert!(is_valid_class_name("  ").is_err());
    assert!(is_valid_class_name("A9勝者").is_err());
}

#[cfg(test)]
#[test]
fn test_scores() {
    assert!(is_valid_score(0).is_ok());
    assert!(is_valid_score(MAX_SCORE).is_ok());
    assert!(is_valid_score(-1).is_err());
    assert!(is_valid_score(MAX_SCORE + 1).is_err());
    assert!(is_valid_score(i64::MAX).is_err());
}
