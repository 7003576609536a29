use crate::models::{
    Action, ActionGroup, Category, CategorizedActions, ClimateSignals, Difficulty, RainfallTrend,
};

/// Upper bound on recommendations returned for one set of signals.
pub const MAX_ACTIONS: usize = 10;

pub struct ActionTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub icon: &'static str,
    pub difficulty: Difficulty,
    pub rationale: fn(&ClimateSignals) -> String,
}

impl ActionTemplate {
    fn build(&self, signals: &ClimateSignals) -> Action {
        Action {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            rationale: (self.rationale)(signals),
            category: self.category,
            icon: self.icon.to_string(),
            difficulty: self.difficulty,
        }
    }
}

pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&ClimateSignals) -> bool,
    pub actions: &'static [ActionTemplate],
}

fn extreme_heat(signals: &ClimateSignals) -> bool {
    signals.hot_days_count > 50
}

fn frequent_heat(signals: &ClimateSignals) -> bool {
    signals.hot_days_count > 30
}

fn drying(signals: &ClimateSignals) -> bool {
    signals.rainfall_trend == RainfallTrend::Decreasing
}

fn wetting(signals: &ClimateSignals) -> bool {
    signals.rainfall_trend == RainfallTrend::Increasing
}

fn warming(signals: &ClimateSignals) -> bool {
    signals.temperature_trend > 1.0
}

fn always(_: &ClimateSignals) -> bool {
    true
}

fn hot_days_per_year(signals: &ClimateSignals) -> String {
    format!(
        "Triggered by: {} hot days expected per year",
        signals.hot_days_count
    )
}

fn hot_days_expected(signals: &ClimateSignals) -> String {
    format!("Triggered by: {} hot days expected", signals.hot_days_count)
}

fn cooling_demand(signals: &ClimateSignals) -> String {
    format!(
        "Triggered by: {} hot days per year raising cooling demand",
        signals.hot_days_count
    )
}

fn temperature_increase(signals: &ClimateSignals) -> String {
    format!(
        "Triggered by: Temperature increase of {:.1}°C",
        signals.temperature_trend
    )
}

fn energy_demand(signals: &ClimateSignals) -> String {
    format!(
        "Triggered by: Rising temperatures (+{:.1}°C) increasing energy demand",
        signals.temperature_trend
    )
}

fn emissions(signals: &ClimateSignals) -> String {
    format!(
        "Triggered by: Warming of {:.1}°C; cutting power emissions slows it",
        signals.temperature_trend
    )
}

fn capitalized_trend(signals: &ClimateSignals) -> String {
    let mut chars = signals.rainfall_trend.label().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn rainfall_trend(signals: &ClimateSignals) -> String {
    format!("Triggered by: {} rainfall trend", capitalized_trend(signals))
}

fn water_scarcity(signals: &ClimateSignals) -> String {
    format!(
        "Triggered by: Water scarcity concerns from {} rainfall",
        signals.rainfall_trend.label()
    )
}

fn flood_risk(_: &ClimateSignals) -> String {
    "Triggered by: Higher flood risk from increased rainfall".to_string()
}

fn general(_: &ClimateSignals) -> String {
    "General climate action".to_string()
}

fn collective(_: &ClimateSignals) -> String {
    "Collective action amplifies impact".to_string()
}

/// Signal predicates and the actions each one emits, in evaluation order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "extreme heat",
        applies: extreme_heat,
        actions: &[
            ActionTemplate {
                id: "heat-1",
                title: "Plant shade trees",
                description: "Plant native trees around your home to reduce heat and provide cooling shade.",
                category: Category::Heat,
                icon: "🌳",
                difficulty: Difficulty::Medium,
                rationale: hot_days_per_year,
            },
            ActionTemplate {
                id: "heat-2",
                title: "Use light-colored roofing",
                description: "Paint roofs white or use reflective materials to reduce indoor heat.",
                category: Category::Heat,
                icon: "🏠",
                difficulty: Difficulty::Hard,
                rationale: temperature_increase,
            },
            ActionTemplate {
                id: "heat-3",
                title: "Stay hydrated",
                description: "Drink more water during hot days and avoid peak sun hours (12-3 PM).",
                category: Category::Heat,
                icon: "💧",
                difficulty: Difficulty::Easy,
                rationale: hot_days_expected,
            },
        ],
    },
    Rule {
        name: "frequent heat",
        applies: frequent_heat,
        actions: &[ActionTemplate {
            id: "heat-4",
            title: "Use fans instead of AC",
            description: "Use ceiling fans and cross-ventilation when possible to save energy.",
            category: Category::Energy,
            icon: "🌀",
            difficulty: Difficulty::Easy,
            rationale: cooling_demand,
        }],
    },
    Rule {
        name: "decreasing rainfall",
        applies: drying,
        actions: &[
            ActionTemplate {
                id: "water-1",
                title: "Harvest rainwater",
                description: "Install a rainwater harvesting system to collect and store monsoon water.",
                category: Category::Water,
                icon: "🌧️",
                difficulty: Difficulty::Hard,
                rationale: rainfall_trend,
            },
            ActionTemplate {
                id: "water-2",
                title: "Fix water leaks",
                description: "Check and repair all taps, pipes, and toilets to stop water waste.",
                category: Category::Water,
                icon: "🔧",
                difficulty: Difficulty::Easy,
                rationale: rainfall_trend,
            },
            ActionTemplate {
                id: "water-3",
                title: "Use drip irrigation",
                description: "If you have plants or a garden, use drip irrigation to save water.",
                category: Category::Water,
                icon: "🌱",
                difficulty: Difficulty::Medium,
                rationale: water_scarcity,
            },
        ],
    },
    Rule {
        name: "increasing rainfall",
        applies: wetting,
        actions: &[
            ActionTemplate {
                id: "water-4",
                title: "Clear drainage systems",
                description: "Keep drains and gutters clean to prevent waterlogging during heavy rains.",
                category: Category::Water,
                icon: "🚰",
                difficulty: Difficulty::Easy,
                rationale: rainfall_trend,
            },
            ActionTemplate {
                id: "water-5",
                title: "Prepare emergency kit",
                description: "Keep emergency supplies ready: torch, battery radio, first aid, water.",
                category: Category::Lifestyle,
                icon: "🎒",
                difficulty: Difficulty::Easy,
                rationale: flood_risk,
            },
        ],
    },
    Rule {
        name: "warming",
        applies: warming,
        actions: &[
            ActionTemplate {
                id: "energy-1",
                title: "Switch to LED bulbs",
                description: "Replace all bulbs with LED lights to reduce electricity use and heat.",
                category: Category::Energy,
                icon: "💡",
                difficulty: Difficulty::Easy,
                rationale: energy_demand,
            },
            ActionTemplate {
                id: "energy-2",
                title: "Use solar power",
                description: "Consider installing solar panels for water heating or electricity.",
                category: Category::Energy,
                icon: "☀️",
                difficulty: Difficulty::Hard,
                rationale: emissions,
            },
        ],
    },
    Rule {
        name: "baseline",
        applies: always,
        actions: &[
            ActionTemplate {
                id: "lifestyle-1",
                title: "Reduce plastic use",
                description: "Carry reusable bags, bottles, and containers to reduce plastic waste.",
                category: Category::Lifestyle,
                icon: "♻️",
                difficulty: Difficulty::Easy,
                rationale: general,
            },
            ActionTemplate {
                id: "lifestyle-2",
                title: "Eat local and seasonal",
                description: "Buy locally grown seasonal fruits and vegetables to reduce food miles.",
                category: Category::Lifestyle,
                icon: "🍎",
                difficulty: Difficulty::Easy,
                rationale: general,
            },
            ActionTemplate {
                id: "community-1",
                title: "Join local climate groups",
                description: "Connect with community groups working on climate awareness and action.",
                category: Category::Community,
                icon: "👥",
                difficulty: Difficulty::Easy,
                rationale: collective,
            },
        ],
    },
];

/// Names of the rules whose predicate holds for these signals, in evaluation order.
pub fn triggered_rules(signals: &ClimateSignals) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(signals))
        .map(|rule| rule.name)
        .collect()
}

/// Evaluate every rule, order by difficulty (stable), keep the first [`MAX_ACTIONS`].
pub fn generate_actions(signals: &ClimateSignals) -> Vec<Action> {
    let mut actions: Vec<Action> = RULES
        .iter()
        .filter(|rule| (rule.applies)(signals))
        .flat_map(|rule| rule.actions.iter().map(|template| template.build(signals)))
        .collect();

    actions.sort_by_key(|action| action.difficulty.rank());
    actions.truncate(MAX_ACTIONS);
    actions
}

pub fn categorize_actions(actions: &[Action]) -> CategorizedActions {
    let mut groups: Vec<ActionGroup> = Vec::new();

    for action in actions {
        match groups.iter_mut().find(|group| group.category == action.category) {
            Some(group) => group.actions.push(action.clone()),
            None => groups.push(ActionGroup {
                category: action.category,
                actions: vec![action.clone()],
            }),
        }
    }

    CategorizedActions { groups }
}
