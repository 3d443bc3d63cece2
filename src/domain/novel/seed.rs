//! 内置示例小说
//!
//! 存储中没有可用数据时使用

use super::{Chapter, ChapterId, Novel};

pub const SEED_TITLE: &str = "The Lighthouse Keeper's Ledger";

const SEED_CHAPTERS: &[(&str, &str)] = &[
    (
        "Chapter 1: The Empty Lamp",
        "<p>The lamp at Greyhaven had been dark for eleven nights when Mara arrived with \
         her trunk and a letter of appointment folded into quarters.</p>\
         <p>The harbourmaster did not look up from his ledger. \"The last keeper kept \
         poor records,\" he said. \"See that you keep better ones.\"</p>",
    ),
    (
        "Chapter 2: Salt and Ink",
        "<p>She found the previous keeper's ledger wedged behind the oil casks, its pages \
         swollen with salt. Every entry ended with the same line: <em>the light was \
         seen</em>.</p>\
         <p>Every entry, that is, until the last, which ended mid-sentence.</p>",
    ),
    (
        "Chapter 3: The Ship That Answered",
        "<p>On the third night a ship answered her signal from a bearing where no ship \
         should be. Mara wrote it down, because that was the work, and because writing \
         it down made it smaller.</p>\
         <p>In the morning the harbourmaster read the entry twice and closed the ledger \
         without a word.</p>",
    ),
    (
        "Chapter 4: Keeping the Light",
        "<p>By winter Mara understood that the ledger was not a record of ships. It was a \
         promise, renewed each night, that someone was watching.</p>\
         <p>She lit the lamp, opened the book, and began to write.</p>",
    ),
];

/// 构造内置示例小说
pub fn seed_novel() -> Novel {
    let chapters = SEED_CHAPTERS
        .iter()
        .zip(1u64..)
        .map(|(&(title, content), id)| Chapter::new(ChapterId::new(id), title, content))
        .collect();
    Novel::new(SEED_TITLE, chapters)
}
