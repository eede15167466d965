//! Outbound messages and their text

use crate::catalog::CatalogEntry;
use crate::quiz::{Effect, EXIT_PHRASE, NEW_RIDDLE_PHRASE, OPTION_COUNT};
use serde::Serialize;

/// Longest caption the messaging platform accepts on a photo
pub const MAX_CAPTION_CHARS: usize = 1024;

pub const START_TEXT: &str = "Привет! Я Айко🌸\n\n\
Чем могу помочь:\n\
• Подобрать аниме на вечер\n\
• Подсказать по сайту\n\
• Поиграть в мини-игру\n\n\
Нажми кнопку ниже 👇";

pub const HELP_TEXT: &str = "Список доступных команд:\n \
/start - Запустить бота\n \
/help - Показать это сообщение\n \
/anime - Получить рекомендацию аниме\n \
/game - Играть в увлекательную игру с аниме";

pub const EMPTY_CATALOG_TEXT: &str = "В списке пока нет аниме.";
pub const PHOTO_ID_HINT: &str = "Пришли фото с подписью /photoid";
const FALLBACK_GREETING: &str = "🌸";

const NOT_READY_TEXT: &str = "Список для игры пока не готов.";
const NOT_STARTED_TEXT: &str = "Игра не запущена.";
const CORRECT_TEXT: &str = "Верно! 🎉";
const INCORRECT_TEXT: &str = "Неа 🙈 Попробуй ещё раз или нажми «🔄 Новая загадка».";
const EXIT_TEXT: &str = "Ок, выходим из игры.";

/// Reply keyboard, row by row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    pub fn main() -> Self {
        Self {
            rows: vec![
                vec!["Aiky".to_string(), "Help".to_string()],
                vec!["Anime".to_string(), "Game".to_string()],
            ],
        }
    }

    /// Two rows of options, then the new-riddle and exit buttons
    pub fn game(options: &[String; OPTION_COUNT]) -> Self {
        let mut rows: Vec<Vec<String>> = options.chunks(2).map(<[String]>::to_vec).collect();
        rows.push(vec![NEW_RIDDLE_PHRASE.to_string(), EXIT_PHRASE.to_string()]);
        Self { rows }
    }
}

/// A message for the host to deliver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutgoingMessage {
    Text {
        text: String,
        /// `None` leaves whatever keyboard the client shows
        #[serde(skip_serializing_if = "Option::is_none")]
        keyboard: Option<Keyboard>,
    },
    Photo {
        url: String,
        caption: String,
    },
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutgoingMessage::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        OutgoingMessage::Text {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

#[cfg(test)]
impl OutgoingMessage {
    pub fn body(&self) -> &str {
        match self {
            OutgoingMessage::Text { text, .. } => text,
            OutgoingMessage::Photo { caption, .. } => caption,
        }
    }
}

pub fn render_effect(effect: &Effect) -> OutgoingMessage {
    match effect {
        Effect::RoundPrompt {
            round,
            total_rounds,
            score,
            completed,
            puzzle,
            options,
        } => OutgoingMessage::with_keyboard(
            format!(
                "Раунд {round}/{total_rounds} • Счёт {score}/{completed}\n\n\
                 Угадай аниме по эмодзи:\n\n{puzzle}\n\nВыбери вариант ниже:"
            ),
            Keyboard::game(options),
        ),
        Effect::Correct => OutgoingMessage::text(CORRECT_TEXT),
        Effect::Incorrect => OutgoingMessage::text(INCORRECT_TEXT),
        Effect::GameOver {
            score,
            total_rounds,
        } => OutgoingMessage::with_keyboard(
            format!("Игра окончена! Счёт: {score}/{total_rounds}"),
            Keyboard::main(),
        ),
        Effect::Exited => OutgoingMessage::with_keyboard(EXIT_TEXT, Keyboard::main()),
        Effect::CatalogNotReady(_) => OutgoingMessage::with_keyboard(NOT_READY_TEXT, Keyboard::main()),
        Effect::NotStarted => OutgoingMessage::with_keyboard(NOT_STARTED_TEXT, Keyboard::main()),
    }
}

pub fn greeting_text(greeting: Option<&String>) -> String {
    greeting.map_or_else(|| FALLBACK_GREETING.to_string(), Clone::clone)
}

pub fn photo_id_text(file_id: &str) -> String {
    format!("file_id:\n{file_id}\n\nМожешь вставить это значение в поле photo_url у нужного аниме.")
}

pub fn recommendation_caption(entry: &CatalogEntry) -> String {
    format!(
        "Вот это аниме я советую посмотреть сегодня вечером:\n\n{}\n\n{}",
        entry.title, entry.description
    )
    .trim()
    .to_string()
}

/// Photo with as much of the caption as fits, plus a follow-up text for the
/// rest. Without a photo the caption goes out as plain text.
pub fn recommendation_messages(caption: String, photo_url: Option<String>) -> Vec<OutgoingMessage> {
    let Some(url) = photo_url else {
        return vec![OutgoingMessage::text(caption)];
    };

    let (head, tail) = split_caption(&caption, MAX_CAPTION_CHARS);
    let mut messages = vec![OutgoingMessage::Photo { url, caption: head }];
    if let Some(rest) = tail {
        messages.push(OutgoingMessage::text(rest));
    }
    messages
}

/// Split after `limit` characters (not bytes)
fn split_caption(caption: &str, limit: usize) -> (String, Option<String>) {
    match caption.char_indices().nth(limit) {
        Some((at, _)) => {
            let (head, tail) = caption.split_at(at);
            (head.to_string(), Some(tail.to_string()))
        }
        None => (caption.to_string(), None),
    }
}
