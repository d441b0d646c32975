// src/utils/romaji.rs

/// Hepburn-style transliteration of hiragana text.
///
/// Digraphs (きゃ, しゅ, ちょ, ...) are matched before single kana.
/// Anything that is not plain hiragana — katakana, kanji, punctuation,
/// emoji, the fill-in-the-blank marker — passes through unchanged, so
/// mixed question text stays readable.
pub fn to_romaji(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(&next) = chars.peek() {
            if let Some(pair) = digraph(c, next) {
                out.push_str(pair);
                chars.next();
                continue;
            }
        }
        match single(c) {
            Some(kana) => out.push_str(kana),
            None => out.push(c),
        }
    }

    out
}

fn digraph(first: char, second: char) -> Option<&'static str> {
    Some(match (first, second) {
        ('き', 'ゃ') => "kya",
        ('き', 'ゅ') => "kyu",
        ('き', 'ょ') => "kyo",
        ('し', 'ゃ') => "sha",
        ('し', 'ゅ') => "shu",
        ('し', 'ょ') => "sho",
        ('ち', 'ゃ') => "cha",
        ('ち', 'ゅ') => "chu",
        ('ち', 'ょ') => "cho",
        ('に', 'ゃ') => "nya",
        ('に', 'ゅ') => "nyu",
        ('に', 'ょ') => "nyo",
        ('ひ', 'ゃ') => "hya",
        ('ひ', 'ゅ') => "hyu",
        ('ひ', 'ょ') => "hyo",
        ('み', 'ゃ') => "mya",
        ('み', 'ゅ') => "myu",
        ('み', 'ょ') => "myo",
        ('り', 'ゃ') => "rya",
        ('り', 'ゅ') => "ryu",
        ('り', 'ょ') => "ryo",
        ('ぎ', 'ゃ') => "gya",
        ('ぎ', 'ゅ') => "gyu",
        ('ぎ', 'ょ') => "gyo",
        ('じ', 'ゃ') => "ja",
        ('じ', 'ゅ') => "ju",
        ('じ', 'ょ') => "jo",
        ('び', 'ゃ') => "bya",
        ('び', 'ゅ') => "byu",
        ('び', 'ょ') => "byo",
        ('ぴ', 'ゃ') => "pya",
        ('ぴ', 'ゅ') => "pyu",
        ('ぴ', 'ょ') => "pyo",
        _ => return None,
    })
}

fn single(c: char) -> Option<&'static str> {
    Some(match c {
        'あ' => "a",
        'い' => "i",
        'う' => "u",
        'え' => "e",
        'お' => "o",
        'か' => "ka",
        'き' => "ki",
        'く' => "ku",
        'け' => "ke",
        'こ' => "ko",
        'さ' => "sa",
        'し' => "shi",
        'す' => "su",
        'せ' => "se",
        'そ' => "so",
        'た' => "ta",
        'ち' => "chi",
        'つ' => "tsu",
        'て' => "te",
        'と' => "to",
        'な' => "na",
        'に' => "ni",
        'ぬ' => "nu",
        'ね' => "ne",
        'の' => "no",
        'は' => "ha",
        'ひ' => "hi",
        'ふ' => "fu",
        'へ' => "he",
        'ほ' => "ho",
        'ま' => "ma",
        'み' => "mi",
        'む' => "mu",
        'め' => "me",
        'も' => "mo",
        'や' => "ya",
        'ゆ' => "yu",
        'よ' => "yo",
        'ら' => "ra",
        'り' => "ri",
        'る' => "ru",
        'れ' => "re",
        'ろ' => "ro",
        'わ' => "wa",
        'を' => "wo",
        'ん' => "n",
        'が' => "ga",
        'ぎ' => "gi",
        'ぐ' => "gu",
        'げ' => "ge",
        'ご' => "go",
        'ざ' => "za",
        'じ' => "ji",
        'ず' => "zu",
        'ぜ' => "ze",
        'ぞ' => "zo",
        'だ' => "da",
        'ぢ' => "ji",
        'づ' => "zu",
        'で' => "de",
        'ど' => "do",
        'ば' => "ba",
        'び' => "bi",
        'ぶ' => "bu",
        'べ' => "be",
        'ぼ' => "bo",
        'ぱ' => "pa",
        'ぴ' => "pi",
        'ぷ' => "pu",
        'ぺ' => "pe",
        'ぽ' => "po",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_kana() {
        assert_eq!(to_romaji("りんご"), "ringo");
        assert_eq!(to_romaji("ねこ"), "neko");
        assert_eq!(to_romaji("がっこう"), "gaっkou");
    }

    #[test]
    fn test_digraphs_win_over_single_kana() {
        assert_eq!(to_romaji("きょう"), "kyou");
        assert_eq!(to_romaji("しゃしん"), "shashin");
        assert_eq!(to_romaji("ぎょうざ"), "gyouza");
    }

    #[test]
    fn test_standalone_small_kana_after_vowel() {
        // ゃ only combines with the row before it; after a vowel it has
        // no reading and passes through.
        assert_eq!(to_romaji("あゃ"), "aゃ");
    }

    #[test]
    fn test_non_hiragana_passes_through() {
        assert_eq!(to_romaji("🍎 これは_______です。"), "🍎 koreha_______desu。");
        assert_eq!(to_romaji("Tokyoタワー"), "Tokyoタワー");
        assert_eq!(to_romaji(""), "");
    }
}
