use serde::Serialize;

/// How an achievement is earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnlockCriteria {
    /// Reach at least this height in a single run.
    Height { min: i32 },
    /// Finish a run, any time.
    Completion,
    /// Finish a run within this many seconds.
    CompletionTime { max_secs: i32 },
    /// Accumulate this many completed runs.
    Completions { min: i64 },
    /// Accumulate this many runs, finished or not.
    GamesPlayed { min: i64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlock_criteria: UnlockCriteria,
    pub unlock_height: i32,
}

/// The full achievement table. Loaded once, never mutated at runtime.
/// Declaration order is the display order.
pub static CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: "first_steps",
        name: "Primeiros Passos",
        description: "Alcance 10 metros de altura",
        icon: "🏃‍♂️",
        unlock_criteria: UnlockCriteria::Height { min: 10 },
        unlock_height: 10,
    },
    AchievementDef {
        id: "getting_high",
        name: "Subindo Alto",
        description: "Alcance 50 metros de altura",
        icon: "🌤️",
        unlock_criteria: UnlockCriteria::Height { min: 50 },
        unlock_height: 50,
    },
    AchievementDef {
        id: "sky_walker",
        name: "Caminhante do Céu",
        description: "Alcance 100 metros de altura",
        icon: "☁️",
        unlock_criteria: UnlockCriteria::Height { min: 100 },
        unlock_height: 100,
    },
    AchievementDef {
        id: "stratosphere",
        name: "Estratosfera",
        description: "Alcance 200 metros de altura",
        icon: "🌌",
        unlock_criteria: UnlockCriteria::Height { min: 200 },
        unlock_height: 200,
    },
    AchievementDef {
        id: "redemption",
        name: "Redenção",
        description: "Complete o jogo alcançando o símbolo da reciclagem",
        icon: "♻️",
        unlock_criteria: UnlockCriteria::Completion,
        unlock_height: 300,
    },
    AchievementDef {
        id: "speed_runner",
        name: "Velocista",
        description: "Complete o jogo em menos de 5 minutos",
        icon: "⚡",
        unlock_criteria: UnlockCriteria::CompletionTime { max_secs: 300 },
        unlock_height: 300,
    },
    AchievementDef {
        id: "persistent",
        name: "Persistente",
        description: "Jogue 10 partidas",
        icon: "💪",
        unlock_criteria: UnlockCriteria::GamesPlayed { min: 10 },
        unlock_height: 0,
    },
    AchievementDef {
        id: "master_jumper",
        name: "Mestre dos Saltos",
        description: "Complete o jogo 3 vezes",
        icon: "👑",
        unlock_criteria: UnlockCriteria::Completions { min: 3 },
        unlock_height: 300,
    },
];

/// Height achievements whose threshold the given height reaches,
/// in declaration order.
pub fn achievements_for_height(height: i32) -> Vec<&'static AchievementDef> {
    CATALOG
        .iter()
        .filter(|a| matches!(a.unlock_criteria, UnlockCriteria::Height { min } if min <= height))
        .collect()
}

/// Achievements that require finishing a run, in declaration order.
pub fn completion_achievements() -> Vec<&'static AchievementDef> {
    CATALOG
        .iter()
        .filter(|a| {
            matches!(
                a.unlock_criteria,
                UnlockCriteria::Completion
                    | UnlockCriteria::CompletionTime { .. }
                    | UnlockCriteria::Completions { .. }
            )
        })
        .collect()
}

pub fn find(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|a| a.id == id)
}
