//! Sort keys that follow the Turkish alphabet.
//!
//! Letters with a cedilla, breve, or diaeresis sort right after their base letter
//! (`c < ç < d`, `s < ş < t`), and dotless `ı` sorts before `i`. Circumflex vowels
//! sort with their base vowel.

/// Appended to a base letter to place the Turkish variant after every plain
/// continuation of it. Sorts above all ASCII letters and digits.
const AFTER_BASE: char = '\u{7f}';

/// Case-insensitive key for ordering Turkish names with `Ord` on `String`.
pub fn sort_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 4);
    for ch in name.trim().chars() {
        match ch {
            'ç' | 'Ç' => push_variant(&mut key, 'c'),
            'ğ' | 'Ğ' => push_variant(&mut key, 'g'),
            'ı' => push_variant(&mut key, 'h'),
            'ö' | 'Ö' => push_variant(&mut key, 'o'),
            'ş' | 'Ş' => push_variant(&mut key, 's'),
            'ü' | 'Ü' => push_variant(&mut key, 'u'),
            'İ' | 'î' | 'Î' => key.push('i'),
            'â' | 'Â' => key.push('a'),
            'û' | 'Û' => key.push('u'),
            other => key.extend(other.to_lowercase()),
        }
    }
    key
}

fn push_variant(key: &mut String, base: char) {
    key.push(base);
    key.push(AFTER_BASE);
}
