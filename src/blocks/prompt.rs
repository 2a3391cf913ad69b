//! Static "today I learned" reminder; needs no fetch.

use crate::models::Block;

const TIL_HEADING: &str = "### 🧠 TIL (fill me in)";
const TIL_BODY: &str =
    "> Add one thing you learned today. Replace this line with a short note and commit.\n";

pub fn til_block() -> Block {
    Block::ready(TIL_HEADING, TIL_BODY)
}
