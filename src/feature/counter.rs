//! Counter-word class lookup.
//!
//! Counter words (助数詞) change the accent of the numeral they attach to in
//! a handful of regular ways. Each class is identified by a letter; the
//! lists below are fixed. A surface form listed under two classes belongs
//! to the first one. Counter words not listed anywhere fall into class `m`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Class assigned to counter words missing from every list.
pub const DEFAULT_COUNTER_CLASS: char = 'm';

const COUNTER_CLASSES: &[(char, &[&str])] = &[
    (
        'a',
        &[
            "個", "位", "時", "分", "時間", "歳", "羽", "通り", "斤", "層", "アール", "センチ",
            "キロ", "ドル", "度", "階", "球", "巡", "乗", "週", "人前", "敗", "着", "度目",
            "代目", "貫目", "日目", "球目", "丁目", "畳", "ヶ月",
        ],
    ),
    (
        'b',
        &[
            "問", "台", "軒", "件", "票", "町", "艘", "代", "枚", "名", "面", "本", "杯", "丁",
        ],
    ),
    ('c', &["升"]),
    ('d', &["年", "段", "番"]),
    ('e', &["貫", "版", "銭", "回", "点", "巻"]),
    ('f', &["尺", "着", "角"]),
    ('g', &["円"]),
    (
        'h',
        &[
            "曲", "石", "匹", "冊", "足", "拍", "脚", "局", "発", "室", "節",
        ],
    ),
    ('i', &["合"]),
    ('j', &["人"]),
    ('k', &["月", "日"]),
    ('l', &["寸"]),
];

static COUNTER_CLASS_MAP: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (class, words) in COUNTER_CLASSES {
        for word in *words {
            map.entry(*word).or_insert(*class);
        }
    }
    map
});

/// Class letter of the counter word `orth`.
pub fn counter_class(orth: &str) -> char {
    COUNTER_CLASS_MAP
        .get(orth)
        .copied()
        .unwrap_or(DEFAULT_COUNTER_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_counters() {
        assert_eq!(counter_class("個"), 'a');
        assert_eq!(counter_class("本"), 'b');
        assert_eq!(counter_class("升"), 'c');
        assert_eq!(counter_class("年"), 'd');
        assert_eq!(counter_class("回"), 'e');
        assert_eq!(counter_class("角"), 'f');
        assert_eq!(counter_class("円"), 'g');
        assert_eq!(counter_class("匹"), 'h');
        assert_eq!(counter_class("合"), 'i');
        assert_eq!(counter_class("人"), 'j');
        assert_eq!(counter_class("日"), 'k');
        assert_eq!(counter_class("寸"), 'l');
    }

    #[test]
    fn test_first_listing_wins() {
        // 着 appears in classes a and f
        assert_eq!(counter_class("着"), 'a');
    }

    #[test]
    fn test_unlisted_counter() {
        assert_eq!(counter_class("ページ"), DEFAULT_COUNTER_CLASS);
    }
}
