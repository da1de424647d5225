//! Key string parsing for definition files
//!
//! Accepts `ctrl+shift+s` style strokes; whitespace separates the strokes of
//! a chord (`ctrl+k ctrl+c`).

use super::types::{KeyCode, Keystroke, Modifiers};

/// Parse a whitespace-separated key sequence like "ctrl+k ctrl+c"
pub fn parse_key_sequence(keys: &str) -> Result<Vec<Keystroke>, String> {
    let strokes = keys
        .split_whitespace()
        .map(parse_key_string)
        .collect::<Result<Vec<_>, _>>()?;

    if strokes.is_empty() {
        return Err("empty key sequence".to_string());
    }
    Ok(strokes)
}

/// Parse a key string like "cmd+shift+s" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, String> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    // A trailing "+" names the plus key itself ("ctrl++")
    let (body, plus_key) = match key_str.strip_suffix("++") {
        Some(rest) => (rest, true),
        None if key_str == "+" => ("", true),
        None => (key_str, false),
    };

    for part in body.split('+').filter(|p| !p.is_empty()) {
        let part_lower = part.to_lowercase();
        match part_lower.as_str() {
            "cmd" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(format!("multiple keys in binding: {}", key_str));
                }
                let code = KeyCode::from_name(&part_lower)
                    .ok_or_else(|| format!("unknown key: {}", part))?;
                key_part = Some(code);
            }
        }
    }

    if plus_key {
        if key_part.is_some() {
            return Err(format!("multiple keys in binding: {}", key_str));
        }
        key_part = Some(KeyCode::Char('+'));
    }

    let key = key_part.ok_or_else(|| format!("no key found in binding: {}", key_str))?;
    Ok(Keystroke::new(key, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let stroke = parse_key_string("a").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('a'));
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_key_with_multiple_modifiers() {
        let stroke = parse_key_string("ctrl+shift+s").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('s'));
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_uppercase_key_is_normalized() {
        let stroke = parse_key_string("Ctrl+C").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('c'));
        assert!(stroke.mods.ctrl());
    }

    #[test]
    fn test_parse_plus_key() {
        let stroke = parse_key_string("ctrl++").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('+'));
        assert!(stroke.mods.ctrl());
    }

    #[test]
    fn test_parse_sequence() {
        let seq = parse_key_sequence("ctrl+k  ctrl+c").unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[1].key, KeyCode::Char('c'));
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(parse_key_string("ctrl+a+b").is_err());
        assert!(parse_key_string("ctrl+").is_err());
        assert!(parse_key_string("hyper+x").is_err());
        assert!(parse_key_sequence("   ").is_err());
    }
}
