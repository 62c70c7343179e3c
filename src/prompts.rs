use rand::seq::SliceRandom;

pub const PROMPTS: &[&str] = &[
    "What made you laugh so hard you almost peed today?",
    "What's the weirdest thing you saw someone do today?",
    "If your life was a sitcom, what would today's episode be called?",
    "What's the most ridiculous thing you believed as a kid?",
    "What's your spirit animal today and why?",
    "If you could swap lives with your pet for a day, what would you do?",
    "What's the most random thought that popped into your head today?",
    "What's your current mood in emoji form?",
    "What's the weirdest dream you remember having?",
    "If you were a superhero, what would your power be and why?",
    "What's the most embarrassing thing you did this week?",
    "What's your current mood in GIF form?",
    "If you could have any animal as a roommate, what would it be?",
    "What's the most ridiculous excuse you've ever made?",
    "What's your spirit food today and why?",
    "If your life was a meme, what would it be?",
    "What's the weirdest thing you've ever googled?",
    "What's your current mood in song form?",
    "If you could have any superpower, what would it be and why?",
    "What's the most random thing you've ever said?",
    "What's your spirit color today and why?",
    "If you were a character in a video game, what would your stats be?",
    "What's the most ridiculous thing you've ever believed?",
    "What's your current mood in movie form?",
    "If you could have any animal as a sidekick, what would it be?",
    "What's the weirdest thing you've ever done in public?",
    "What's your spirit number today and why?",
    "If you were a meme, what would you be?",
    "What's the most random thing you've ever thought?",
    "What's your current mood in TV show form?",
    "If you could have any mythical creature as a pet, what would it be?",
    "What's the most ridiculous thing you've ever said?",
    "What's your spirit element today and why?",
    "If you were a character in a book, what would your role be?",
    "What's the weirdest thing you've ever seen?",
    "What's your current mood in weather form?",
    "If you could have any superpower, what would it be and why?",
    "What's the most random thing you've ever done?",
    "What's your spirit season today and why?",
    "If you were a character in a movie, what would your role be?",
    "What's the most ridiculous thing you've ever believed?",
    "What's your current mood in food form?",
    "If you could have any animal as a best friend, what would it be?",
    "What's the weirdest thing you've ever heard?",
    "What's your spirit time of day today and why?",
    "If you were a character in a TV show, what would your role be?",
    "What's the most random thing you've ever seen?",
    "What's your current mood in color form?",
    "If you could have any mythical creature as a sidekick, what would it be?",
];

pub fn random_prompt() -> &'static str {
    PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PROMPTS[0])
}

/// Appends a prompt line, leaving a blank line after any existing text.
pub fn append_prompt(content: &str, prompt: &str) -> String {
    if content.is_empty() {
        format!("✨ {prompt}\n")
    } else {
        format!("{content}\n\n✨ {prompt}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_prompt_comes_from_list() {
        let prompt = random_prompt();
        assert!(PROMPTS.contains(&prompt));
    }

    #[test]
    fn append_to_empty_content() {
        assert_eq!(append_prompt("", "Why?"), "✨ Why?\n");
    }

    #[test]
    fn append_after_existing_text() {
        assert_eq!(append_prompt("Today.", "Why?"), "Today.\n\n✨ Why?\n");
    }

    #[test]
    fn every_prompt_is_a_question() {
        assert_eq!(PROMPTS.len(), 49);
        assert!(PROMPTS.iter().all(|prompt| prompt.ends_with('?')));
    }
}
