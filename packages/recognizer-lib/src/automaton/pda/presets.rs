//! Two classical counting languages, used by the driver's demo mode.
//!
//! Both automata push one `'X'` per leading `a` and pop it again for every
//! matching closing symbol.

use crate::automaton::pda::{
    PDA, PdaTransition,
    stack::StackOp::{Keep, Pop, Push},
};

pub type PresetPDA = PDA<&'static str, char, char>;

/// Recognizes `a^n b c^n` for `n >= 1`.
pub fn a_n_b_c_n() -> PresetPDA {
    PDA::new(
        ["q0", "q1", "q2", "q3"],
        ['a', 'b', 'c'],
        ['X'],
        "q0",
        ["q3"],
        [
            PdaTransition::new("q0", 'a', None, "q1", Push('X')),
            PdaTransition::new("q1", 'a', Some('X'), "q1", Push('X')),
            PdaTransition::new("q1", 'b', Some('X'), "q2", Keep),
            PdaTransition::new("q2", 'c', Some('X'), "q3", Pop),
            PdaTransition::new("q3", 'c', Some('X'), "q3", Pop),
        ],
    )
    .expect("a^n b c^n table only uses declared states and symbols")
}

/// Recognizes `a^n b^n` for `n >= 1`.
pub fn a_n_b_n() -> PresetPDA {
    PDA::new(
        ["q0", "q1", "q2"],
        ['a', 'b'],
        ['X'],
        "q0",
        ["q2"],
        [
            PdaTransition::new("q0", 'a', None, "q1", Push('X')),
            PdaTransition::new("q1", 'a', Some('X'), "q1", Push('X')),
            PdaTransition::new("q1", 'b', Some('X'), "q2", Pop),
            PdaTransition::new("q2", 'b', Some('X'), "q2", Pop),
        ],
    )
    .expect("a^n b^n table only uses declared states and symbols")
}

/// The words the demo mode feeds to [a_n_b_c_n].
pub const A_N_B_C_N_WORDS: [&str; 5] = ["aabcc", "abc", "abbc", "aaabccc", "abca"];

/// The words the demo mode feeds to [a_n_b_n].
pub const A_N_B_N_WORDS: [&str; 5] = ["aabb", "ab", "abb", "aaabbb", "abab"];
