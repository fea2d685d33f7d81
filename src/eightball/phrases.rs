/// The answers a magic eight-ball can give.
pub const EIGHTBALL_PHRASES: [&str; 20] = [
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy, try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

/// Returns true if the string is one of the `EIGHTBALL_PHRASES`.
#[cfg(test)]
pub fn is_eightball_phrase(phrase: &str) -> bool {
    EIGHTBALL_PHRASES.contains(&phrase)
}
