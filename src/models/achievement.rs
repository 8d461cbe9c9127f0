use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Gamification badges. Thresholds live in `core::calculator::achievements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    // Tip performance
    TipMaster,
    EliteServer,
    TipChampion,
    // Consistency
    SteadyTracker,
    DedicatedLogger,
    TrackingLegend,
    // Earnings
    HighEarner,
    TopPerformer,
    SalesStar,
    // Goals
    TargetCrusher,
    GoalGetter,
    PerfectMonth,
}

impl AchievementType {
    pub const ALL: [AchievementType; 12] = [
        AchievementType::TipMaster,
        AchievementType::EliteServer,
        AchievementType::TipChampion,
        AchievementType::SteadyTracker,
        AchievementType::DedicatedLogger,
        AchievementType::TrackingLegend,
        AchievementType::HighEarner,
        AchievementType::TopPerformer,
        AchievementType::SalesStar,
        AchievementType::TargetCrusher,
        AchievementType::GoalGetter,
        AchievementType::PerfectMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementType::TipMaster => "tip_master",
            AchievementType::EliteServer => "elite_server",
            AchievementType::TipChampion => "tip_champion",
            AchievementType::SteadyTracker => "steady_tracker",
            AchievementType::DedicatedLogger => "dedicated_logger",
            AchievementType::TrackingLegend => "tracking_legend",
            AchievementType::HighEarner => "high_earner",
            AchievementType::TopPerformer => "top_performer",
            AchievementType::SalesStar => "sales_star",
            AchievementType::TargetCrusher => "target_crusher",
            AchievementType::GoalGetter => "goal_getter",
            AchievementType::PerfectMonth => "perfect_month",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AchievementType::TipMaster => "Tip Master",
            AchievementType::EliteServer => "Elite Server",
            AchievementType::TipChampion => "Tip Champion",
            AchievementType::SteadyTracker => "Steady Tracker",
            AchievementType::DedicatedLogger => "Dedicated Logger",
            AchievementType::TrackingLegend => "Tracking Legend",
            AchievementType::HighEarner => "High Earner",
            AchievementType::TopPerformer => "Top Performer",
            AchievementType::SalesStar => "Sales Star",
            AchievementType::TargetCrusher => "Target Crusher",
            AchievementType::GoalGetter => "Goal Getter",
            AchievementType::PerfectMonth => "Perfect Month",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementType::TipMaster => "Achieve 20%+ average tips",
            AchievementType::EliteServer => "Achieve 25%+ average tips",
            AchievementType::TipChampion => "Achieve 30%+ average tips",
            AchievementType::SteadyTracker => "Track 7 consecutive days",
            AchievementType::DedicatedLogger => "Track 30 consecutive days",
            AchievementType::TrackingLegend => "Track 100 consecutive days",
            AchievementType::HighEarner => "Earn $30+/hour average",
            AchievementType::TopPerformer => "Earn $50+/hour average",
            AchievementType::SalesStar => "Serve $1000+ in one shift",
            AchievementType::TargetCrusher => "Exceed goal by 50%",
            AchievementType::GoalGetter => "Meet all weekly targets",
            AchievementType::PerfectMonth => "Meet all monthly targets",
        }
    }
}

/// Row of the `achievements` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_type: AchievementType,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Achievement {
    pub fn unlock(user_id: Uuid, achievement_type: AchievementType, data: Option<Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            achievement_type,
            unlocked_at: Some(Utc::now()),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_round_trips_through_its_name() {
        for a in AchievementType::ALL {
            assert_eq!(AchievementType::from_db_str(a.as_str()), Some(a));
            let json = serde_json::to_string(&a).unwrap();
            assert_eq!(json, format!("\"{}\"", a.as_str()));
        }
    }
}
