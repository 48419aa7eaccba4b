//! 写作提示
//!
//! 认捐前随机给出一条灵感提示，以及对应的认捐宣言。

use rand::Rng;

const GENERIC_PROMPTS: &[&str] = &[
    "Introduce a new character with a secret.",
    "Describe a setting that feels slightly off.",
    "Add a line that changes the mood completely.",
    "Reveal something the main character doesn't know yet.",
    "Include a detail that hints at a past event.",
    "Write a moment of unexpected connection.",
    "Introduce a conflict without resolving it.",
    "Add a sensory detail that deepens the atmosphere.",
    "Include a metaphor that reshapes the reader's understanding.",
    "Let something go missing — and someone notice.",
    "Write a line that could be interpreted two ways.",
    "Introduce a question that no one wants to answer.",
    "Add a moment of silence that says everything.",
    "Reveal a character's fear through their actions.",
    "Include a symbol that might mean more later.",
    "Write a line that feels like a turning point.",
    "Let a character overhear something they shouldn't.",
    "Describe a change in the weather that mirrors emotion.",
    "Add a line that feels like foreshadowing.",
    "Introduce a recurring image or phrase.",
    "Let a character make a choice they'll regret.",
    "Include a moment of joy in an unexpected place.",
    "Write a line that could be the story's title.",
    "Add a contradiction that makes the reader pause.",
    "Reveal a truth through something mundane.",
    "Introduce a character who doesn't speak.",
    "Write a moment that feels like déjà vu.",
    "Include a line that could be a prophecy or warning.",
    "Let something break — physically or emotionally.",
    "End with a line that invites the next twist.",
];

/// 一条写作提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritingPrompt {
    pub prompt_text: &'static str,
    /// 例如 `I pledge 2 verses`
    pub pledge_text: String,
}

/// 全部提示
pub fn prompts() -> &'static [&'static str] {
    GENERIC_PROMPTS
}

/// 随机选一条提示，并生成认捐宣言
pub fn writing_prompt<R: Rng + ?Sized>(rng: &mut R, amount: u32, unit: &str) -> WritingPrompt {
    let prompt_text = GENERIC_PROMPTS[rng.random_range(0..GENERIC_PROMPTS.len())];
    WritingPrompt {
        prompt_text,
        pledge_text: pledge_text(amount, unit),
    }
}

/// `I pledge {amount} {unit}`，数量不为 1 时单位加 `s`
pub fn pledge_text(amount: u32, unit: &str) -> String {
    if amount == 1 {
        format!("I pledge {} {}", amount, unit)
    } else {
        format!("I pledge {} {}s", amount, unit)
    }
}
