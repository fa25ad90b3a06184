//! Fixed prompt templates for each coaching use case.
//!
//! Placeholders are written `{name}` and filled by [`PromptTemplate::render`].

pub struct PromptTemplate {
    pub system: &'static str,
    pub user_template: &'static str,
    /// Upper bound on generated tokens for this use case.
    pub max_tokens: u32,
}

impl PromptTemplate {
    /// Substitute each `{key}` with its value. Unknown placeholders are left as-is.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = self.user_template.to_string();
        for (key, value) in values {
            out = out.replace(&format!("{{{key}}}"), value);
        }
        out
    }
}

pub const GAME_ANALYSIS: PromptTemplate = PromptTemplate {
    system: "You are an encouraging chess coach reviewing a student's finished game. \
Identify the turning points, name the patterns behind them, and give practical advice. \
Respond with a single JSON object and nothing else, using exactly these fields: \
summary (string), keyMoments (array of {moveNumber: number, move: string, \
type: \"blunder\" | \"mistake\" | \"good\" | \"brilliant\", description: string, evaluation: number}), \
suggestions (array of strings), recurringPatterns (array of strings), \
strengthsAndWeaknesses ({strengths: array of strings, weaknesses: array of strings}).",
    user_template: "Analyze this game. I played {player_color} and the result was a {result}.\n\nPGN:\n{pgn}",
    max_tokens: 2000,
};

pub const COACH_CHAT: PromptTemplate = PromptTemplate {
    system: "You are a friendly, knowledgeable chess coach. Answer questions about openings, \
tactics, strategy and endgames clearly and concisely, with concrete examples where they help. \
Keep answers suitable for an improving club player.",
    user_template: "{message}",
    max_tokens: 1024,
};

pub const HINT_GENERATION: PromptTemplate = PromptTemplate {
    system: "You are a chess coach giving a hint during a live game. Point the student toward \
the key idea of the position without naming the exact move. Answer in one or two sentences.",
    user_template: "I am playing {player_color}. The current position is (FEN): {fen}\n\nWhat should I be thinking about?",
    max_tokens: 256,
};

pub const WEEKLY_REFLECTION: PromptTemplate = PromptTemplate {
    system: "You are a chess coach writing a short weekly reflection for a student. \
Highlight progress, recurring problems, and one or two focus areas for next week.",
    user_template: "Here is a summary of my games this week:\n\n{games_summary}",
    max_tokens: 1024,
};
