//! Vowel-group syllable estimation.

const fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

fn ends_with_sibilant(stem: &[u8]) -> bool {
    matches!(stem.last(), Some(b's' | b'x' | b'z'))
        || stem.ends_with(b"ch")
        || stem.ends_with(b"sh")
}

/// Estimates the syllables in one word.
///
/// Counts vowel groups (`y` included), then corrects for silent endings:
/// `-es` after a non-sibilant, `-ed` after anything but `t`/`d`, and a final
/// `-e` unless it forms a consonant + `le` syllable. Non-empty words have at
/// least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word = word.trim().to_ascii_lowercase();
    let bytes = word.as_bytes();
    let n = bytes.len();
    if n == 0 {
        return 0;
    }

    let mut count: usize = 0;
    let mut in_vowel = false;
    for &b in bytes {
        let vowel = is_vowel(b);
        if vowel && !in_vowel {
            count += 1;
        }
        in_vowel = vowel;
    }

    let silent = if n >= 3 && bytes.ends_with(b"es") {
        !ends_with_sibilant(&bytes[..n - 2])
    } else if n >= 3 && bytes.ends_with(b"ed") {
        !matches!(bytes[n - 3], b't' | b'd')
    } else if n >= 2 && bytes[n - 1] == b'e' {
        !(n >= 3 && bytes[n - 2] == b'l' && !is_vowel(bytes[n - 3]))
    } else {
        false
    };
    if silent {
        count = count.saturating_sub(1);
    }

    count.max(1)
}
