use telesonar_app::domain::{ResearchCommand, TrendingPeriod};
use telesonar_app::infrastructure::telegram::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Welcome,
    Research(ResearchCommand),
    Nvd,
    Trending,
}

impl Command {
    /// Parses the leading `/command` (optionally `/command@BotName`) of a message.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?.strip_prefix('/')?;
        let name = token.split('@').next().unwrap_or(token).to_ascii_lowercase();

        match name.as_str() {
            "start" | "help" => Some(Self::Welcome),
            "factcheck" => Some(Self::Research(ResearchCommand::FactCheck)),
            "cve" => Some(Self::Research(ResearchCommand::Cve)),
            "osint" => Some(Self::Research(ResearchCommand::Osint)),
            "nvd" => Some(Self::Nvd),
            "trending" => Some(Self::Trending),
            _ => None,
        }
    }
}

/// The replied-to message's text wins; otherwise everything after the command.
pub fn input_text(message: &Message) -> Option<String> {
    if let Some(replied) = message
        .reply_to_message
        .as_ref()
        .and_then(|m| m.text.as_deref())
        .filter(|t| !t.trim().is_empty())
    {
        return Some(replied.to_string());
    }

    let text = message.text.as_deref()?.trim_start();
    let (_, rest) = text.split_once(char::is_whitespace)?;
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// `/trending [language] [daily|weekly|monthly]`
pub fn trending_args(input: Option<&str>) -> (Option<String>, TrendingPeriod) {
    let mut parts = input.unwrap_or_default().split_whitespace();
    let language = parts.next().map(str::to_string);
    let period = parts
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or_default();
    (language, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use telesonar_app::infrastructure::telegram::Update;

    fn message(json: &str) -> Message {
        let update: Update =
            serde_json::from_str(&format!(r#"{{"update_id": 1, "message": {}}}"#, json)).unwrap();
        update.message.unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Welcome));
        assert_eq!(Command::parse("/help extra"), Some(Command::Welcome));
        assert_eq!(
            Command::parse("/factcheck the earth is flat"),
            Some(Command::Research(ResearchCommand::FactCheck))
        );
        assert_eq!(
            Command::parse("/CVE@TeleSonarBot log4j"),
            Some(Command::Research(ResearchCommand::Cve))
        );
        assert_eq!(Command::parse("/nvd apache"), Some(Command::Nvd));
        assert_eq!(Command::parse("  /trending rust"), Some(Command::Trending));
    }

    #[test]
    fn test_ignores_non_commands() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("please /start"), None);
    }

    #[test]
    fn test_input_from_arguments() {
        let msg = message(
            r#"{"message_id": 1, "chat": {"id": 1}, "text": "/osint   Acme Corp  "}"#,
        );
        assert_eq!(input_text(&msg).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_input_from_reply_wins() {
        let msg = message(
            r#"{"message_id": 2, "chat": {"id": 1}, "text": "/factcheck ignored",
                "reply_to_message": {"message_id": 1, "chat": {"id": 1}, "text": "cats can fly"}}"#,
        );
        assert_eq!(input_text(&msg).as_deref(), Some("cats can fly"));
    }

    #[test]
    fn test_no_input() {
        let bare = message(r#"{"message_id": 1, "chat": {"id": 1}, "text": "/cve"}"#);
        assert_eq!(input_text(&bare), None);

        let blank = message(r#"{"message_id": 1, "chat": {"id": 1}, "text": "/cve    "}"#);
        assert_eq!(input_text(&blank), None);
    }

    #[test]
    fn test_trending_args() {
        assert_eq!(trending_args(None), (None, TrendingPeriod::Daily));
        assert_eq!(
            trending_args(Some("python weekly")),
            (Some("python".to_string()), TrendingPeriod::Weekly)
        );
        assert_eq!(
            trending_args(Some("go yearly")),
            (Some("go".to_string()), TrendingPeriod::Daily)
        );
    }
}
