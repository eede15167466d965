//! Bot commands and keyboard buttons

/// Something the bot does on request, outside of quiz answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Anime,
    Game,
    /// The `Aiky` button: a random warm greeting
    Greeting,
    /// Echo the file id of an attached photo
    PhotoId,
}

impl Command {
    /// Recognise a command in message text.
    ///
    /// Buttons match their label exactly. Slash commands match on the first
    /// word and may carry a `@botname` suffix. `/photoid` only counts as a
    /// photo caption.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text {
            "Start" => Some(Command::Start),
            "Help" => Some(Command::Help),
            "Anime" => Some(Command::Anime),
            "Game" => Some(Command::Game),
            "Aiky" => Some(Command::Greeting),
            _ => match slash_name(text)? {
                "start" => Some(Command::Start),
                "help" => Some(Command::Help),
                "anime" => Some(Command::Anime),
                "game" => Some(Command::Game),
                _ => None,
            },
        }
    }

    /// Recognise a command in a photo caption. Only `/photoid` is accepted.
    pub fn parse_caption(caption: &str) -> Option<Self> {
        let caption = caption.trim();
        let is_photo_id = caption.split_whitespace().count() == 1 && slash_name(caption)? == "photoid";
        is_photo_id.then_some(Command::PhotoId)
    }
}

fn slash_name(text: &str) -> Option<&str> {
    let word = text.split_whitespace().next()?.strip_prefix('/')?;
    Some(word.split_once('@').map_or(word, |(name, _bot)| name))
}

/// Slash-prefixed text is never treated as a quiz answer
pub fn looks_like_command(text: &str) -> bool {
    text.trim_start().starts_with('/')
}
