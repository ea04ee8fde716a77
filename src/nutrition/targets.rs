//! Daily energy and macronutrient targets.
//!
//! BMR follows Mifflin-St Jeor, TDEE scales it by the activity tier, and the
//! goal shifts TDEE by a daily deficit or surplus derived from a monthly
//! rate of weight change (7700 kcal per kg). Weight-loss targets are clamped
//! to a safety floor. Protein and fat are set per kg of body weight and
//! carbohydrates absorb whatever calories remain.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{ActivityLevel, Goal, Sex, UnknownVariant};

pub const KCAL_PER_KG: f64 = 7700.0;
pub const DAYS_PER_MONTH: f64 = 30.0;

pub const DEFAULT_LOSS_KG_PER_MONTH: f64 = 2.0;
pub const DEFAULT_GAIN_KG_PER_MONTH: f64 = 1.0;

pub const TRAINING_BONUS: f64 = 1.15;

pub const SAFETY_BMR_FRACTION: f64 = 0.95;
pub const SAFETY_TDEE_FRACTION: f64 = 0.75;
/// Only used when the safety floor itself cannot be computed.
pub const LEGACY_MIN_CALORIES: f64 = 1200.0;

pub const PROTEIN_G_PER_KG: f64 = 2.2;
pub const FAT_G_PER_KG: f64 = 0.8;
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// The inputs the engine reads from a user's profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    /// Magnitude only; the goal gives the direction.
    pub monthly_rate_kg: Option<f64>,
}

/// How an exercise-day flag changes the activity multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseAdjustmentPolicy {
    /// The flag has no effect.
    Ignore,
    /// Rest days use the sedentary multiplier, exercise days the profile's tier.
    #[default]
    RestDaySedentary,
    /// Exercise days get a flat bonus on top of the profile's tier.
    TrainingBonus,
}

impl FromStr for ExerciseAdjustmentPolicy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "rest_day_sedentary" => Ok(Self::RestDaySedentary),
            "training_bonus" => Ok(Self::TrainingBonus),
            other => Err(UnknownVariant {
                kind: "exercise policy",
                value: other.to_string(),
            }),
        }
    }
}

impl ExerciseAdjustmentPolicy {
    pub fn multiplier(self, level: ActivityLevel, is_exercise_day: bool) -> f64 {
        match self {
            Self::Ignore => level.multiplier(),
            Self::RestDaySedentary if is_exercise_day => level.multiplier(),
            Self::RestDaySedentary => ActivityLevel::Sedentary.multiplier(),
            Self::TrainingBonus if is_exercise_day => level.multiplier() * TRAINING_BONUS,
            Self::TrainingBonus => level.multiplier(),
        }
    }
}

/// Mifflin-St Jeor constant per sex category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrOffsets {
    pub male: f64,
    pub female: f64,
    pub other: f64,
}

impl Default for BmrOffsets {
    fn default() -> Self {
        Self {
            male: 5.0,
            female: -161.0,
            other: -161.0,
        }
    }
}

impl BmrOffsets {
    pub fn offset(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
            Sex::Other => self.other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSettings {
    pub exercise_policy: ExerciseAdjustmentPolicy,
    pub bmr_offsets: BmrOffsets,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub target_calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    /// Set when a weight-loss target was raised to the safety floor.
    pub is_safe_limited: bool,
    pub is_exercise_day: bool,
}

pub fn basal_metabolic_rate(profile: &BiometricProfile, offsets: &BmrOffsets) -> f64 {
    10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age_years)
        + offsets.offset(profile.sex)
}

/// Minimum calories a weight-loss target may prescribe.
pub fn safety_floor(bmr: f64, tdee: f64) -> f64 {
    (bmr * SAFETY_BMR_FRACTION).max(tdee * SAFETY_TDEE_FRACTION)
}

/// Daily kcal shift implied by the goal; negative for a deficit.
pub fn daily_energy_adjustment(goal: Goal, monthly_rate_kg: Option<f64>) -> f64 {
    let rate = |default: f64| match monthly_rate_kg {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => default,
    };
    match goal {
        Goal::Maintain => 0.0,
        Goal::Lose => -(rate(DEFAULT_LOSS_KG_PER_MONTH) * KCAL_PER_KG / DAYS_PER_MONTH),
        Goal::Gain => rate(DEFAULT_GAIN_KG_PER_MONTH) * KCAL_PER_KG / DAYS_PER_MONTH,
    }
}

pub fn compute_daily_targets(
    profile: &BiometricProfile,
    is_exercise_day: bool,
    settings: &TargetSettings,
) -> DailyTargets {
    let bmr = basal_metabolic_rate(profile, &settings.bmr_offsets);
    let activity_multiplier = settings
        .exercise_policy
        .multiplier(profile.activity_level, is_exercise_day);
    let tdee = bmr * activity_multiplier;

    let mut target_calories = tdee + daily_energy_adjustment(profile.goal, profile.monthly_rate_kg);
    let mut is_safe_limited = false;

    if profile.goal == Goal::Lose {
        let floor = safety_floor(bmr, tdee);
        let floor = if floor.is_finite() && floor > 0.0 {
            floor
        } else {
            LEGACY_MIN_CALORIES
        };
        if target_calories < floor {
            target_calories = floor;
            is_safe_limited = true;
        }
    }

    let protein_g = profile.weight_kg * PROTEIN_G_PER_KG;
    let fat_g = profile.weight_kg * FAT_G_PER_KG;
    let fixed_kcal = protein_g * KCAL_PER_G_PROTEIN + fat_g * KCAL_PER_G_FAT;
    let carbs_g = ((target_calories - fixed_kcal) / KCAL_PER_G_CARBS).max(0.0);

    DailyTargets {
        bmr,
        tdee,
        activity_multiplier,
        target_calories,
        protein_g,
        fat_g,
        carbs_g,
        is_safe_limited,
        is_exercise_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn reference_profile() -> BiometricProfile {
        BiometricProfile {
            age_years: 30,
            height_cm: 175.0,
            weight_kg: 70.0,
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Lose,
            monthly_rate_kg: Some(2.0),
        }
    }

    fn with_policy(policy: ExerciseAdjustmentPolicy) -> TargetSettings {
        TargetSettings {
            exercise_policy: policy,
            ..TargetSettings::default()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn reference_scenario_matches_hand_calculation() {
        let t = compute_daily_targets(&reference_profile(), true, &TargetSettings::default());
        assert_close(t.bmr, 1648.75);
        assert_close(t.tdee, 2555.5625);
        assert_close(t.target_calories, 2555.5625 - 2.0 * 7700.0 / 30.0);
        assert!((t.target_calories - 2042.23).abs() < 0.01);
        assert!(!t.is_safe_limited);
        assert_close(t.protein_g, 154.0);
        assert_close(t.fat_g, 56.0);
        assert_close(t.carbs_g, (t.target_calories - 154.0 * 4.0 - 56.0 * 9.0) / 4.0);
    }

    #[test]
    fn bmr_is_deterministic() {
        let settings = TargetSettings::default();
        let a = compute_daily_targets(&reference_profile(), false, &settings);
        let b = compute_daily_targets(&reference_profile(), false, &settings);
        assert_eq!(a, b);
    }

    #[test]
    fn female_and_other_share_offset_by_default() {
        let offsets = BmrOffsets::default();
        let mut p = reference_profile();
        p.sex = Sex::Female;
        let female = basal_metabolic_rate(&p, &offsets);
        p.sex = Sex::Other;
        let other = basal_metabolic_rate(&p, &offsets);
        assert_close(female, 1648.75 - 166.0);
        assert_close(female, other);
    }

    #[test]
    fn other_offset_is_configurable() {
        let offsets = BmrOffsets { other: -78.0, ..BmrOffsets::default() };
        let mut p = reference_profile();
        p.sex = Sex::Other;
        assert_close(basal_metabolic_rate(&p, &offsets), 1648.75 - 5.0 - 78.0);
    }

    #[test]
    fn athlete_tdee_not_below_sedentary() {
        let settings = with_policy(ExerciseAdjustmentPolicy::Ignore);
        let mut p = reference_profile();
        p.goal = Goal::Maintain;
        p.activity_level = ActivityLevel::Sedentary;
        let sedentary = compute_daily_targets(&p, false, &settings).tdee;
        p.activity_level = ActivityLevel::Athlete;
        let athlete = compute_daily_targets(&p, false, &settings).tdee;
        assert!(athlete >= sedentary);
        assert_close(athlete / sedentary, 1.90 / 1.20);
    }

    #[test]
    fn goals_order_calories() {
        let settings = with_policy(ExerciseAdjustmentPolicy::Ignore);
        let mut p = reference_profile();
        let lose = compute_daily_targets(&p, false, &settings);
        p.goal = Goal::Maintain;
        let maintain = compute_daily_targets(&p, false, &settings);
        p.goal = Goal::Gain;
        let gain = compute_daily_targets(&p, false, &settings);

        assert!(!lose.is_safe_limited);
        assert!(lose.target_calories < maintain.target_calories);
        assert!(maintain.target_calories < gain.target_calories);
        assert_close(maintain.target_calories, maintain.tdee);
    }

    #[test]
    fn missing_or_zero_rate_uses_defaults() {
        assert_close(daily_energy_adjustment(Goal::Lose, None), -2.0 * 7700.0 / 30.0);
        assert_close(daily_energy_adjustment(Goal::Lose, Some(0.0)), -2.0 * 7700.0 / 30.0);
        assert_close(daily_energy_adjustment(Goal::Gain, None), 7700.0 / 30.0);
        assert_close(daily_energy_adjustment(Goal::Gain, Some(-3.0)), 7700.0 / 30.0);
        assert_close(daily_energy_adjustment(Goal::Gain, Some(0.5)), 0.5 * 7700.0 / 30.0);
        assert_close(daily_energy_adjustment(Goal::Maintain, Some(4.0)), 0.0);
    }

    #[test]
    fn aggressive_loss_is_clamped_to_safety_floor() {
        let p = BiometricProfile {
            age_years: 60,
            height_cm: 150.0,
            weight_kg: 50.0,
            sex: Sex::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Lose,
            monthly_rate_kg: Some(4.0),
        };
        let t = compute_daily_targets(&p, false, &TargetSettings::default());
        assert_close(t.bmr, 976.5);
        assert!(t.is_safe_limited);
        assert_close(t.target_calories, safety_floor(t.bmr, t.tdee));
        assert_close(t.target_calories, 976.5 * 0.95);
    }

    #[test]
    fn loss_target_never_below_floor() {
        let settings = TargetSettings::default();
        for weight in [45.0, 70.0, 95.0, 140.0] {
            for level in ActivityLevel::ALL {
                for rate in [0.5, 1.0, 2.0, 3.0, 5.0, 8.0] {
                    for exercised in [false, true] {
                        let p = BiometricProfile {
                            age_years: 40,
                            height_cm: 168.0,
                            weight_kg: weight,
                            sex: Sex::Other,
                            activity_level: level,
                            goal: Goal::Lose,
                            monthly_rate_kg: Some(rate),
                        };
                        let t = compute_daily_targets(&p, exercised, &settings);
                        assert!(t.target_calories + EPS >= safety_floor(t.bmr, t.tdee));
                    }
                }
            }
        }
    }

    #[test]
    fn gain_is_never_clamped() {
        let mut p = reference_profile();
        p.goal = Goal::Gain;
        p.monthly_rate_kg = Some(10.0);
        let t = compute_daily_targets(&p, true, &TargetSettings::default());
        assert!(!t.is_safe_limited);
        assert_close(t.target_calories, t.tdee + 10.0 * 7700.0 / 30.0);
    }

    #[test]
    fn carbs_floor_at_zero_when_protein_and_fat_exceed_budget() {
        let p = BiometricProfile {
            age_years: 70,
            height_cm: 160.0,
            weight_kg: 150.0,
            sex: Sex::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::Lose,
            monthly_rate_kg: Some(2.0),
        };
        let t = compute_daily_targets(&p, false, &TargetSettings::default());
        assert!(t.protein_g * 4.0 + t.fat_g * 9.0 > t.target_calories);
        assert_eq!(t.carbs_g, 0.0);
    }

    #[test]
    fn rest_day_collapses_to_sedentary() {
        let settings = with_policy(ExerciseAdjustmentPolicy::RestDaySedentary);
        let rest = compute_daily_targets(&reference_profile(), false, &settings);
        let trained = compute_daily_targets(&reference_profile(), true, &settings);
        assert_close(rest.activity_multiplier, 1.20);
        assert_close(trained.activity_multiplier, 1.55);
        assert!(trained.is_exercise_day);
    }

    #[test]
    fn training_bonus_multiplies_tier() {
        let settings = with_policy(ExerciseAdjustmentPolicy::TrainingBonus);
        let rest = compute_daily_targets(&reference_profile(), false, &settings);
        let trained = compute_daily_targets(&reference_profile(), true, &settings);
        assert_close(rest.tdee, 2555.5625);
        assert_close(trained.tdee, 2555.5625 * 1.15);
    }

    #[test]
    fn ignore_policy_disregards_flag() {
        let settings = with_policy(ExerciseAdjustmentPolicy::Ignore);
        let rest = compute_daily_targets(&reference_profile(), false, &settings);
        let trained = compute_daily_targets(&reference_profile(), true, &settings);
        assert_close(rest.tdee, trained.tdee);
    }

    #[test]
    fn degenerate_profile_does_not_panic() {
        let p = BiometricProfile {
            age_years: 0,
            height_cm: 0.0,
            weight_kg: 0.0,
            sex: Sex::Female,
            activity_level: ActivityLevel::Light,
            goal: Goal::Lose,
            monthly_rate_kg: None,
        };
        let t = compute_daily_targets(&p, false, &TargetSettings::default());
        assert!(t.is_safe_limited);
        assert_close(t.target_calories, LEGACY_MIN_CALORIES);
        assert!(t.carbs_g >= 0.0);
    }

    #[test]
    fn policy_parses_from_config_names() {
        assert_eq!(
            "training_bonus".parse::<ExerciseAdjustmentPolicy>().unwrap(),
            ExerciseAdjustmentPolicy::TrainingBonus
        );
        assert!("sometimes".parse::<ExerciseAdjustmentPolicy>().is_err());
        assert_eq!(
            ExerciseAdjustmentPolicy::default(),
            ExerciseAdjustmentPolicy::RestDaySedentary
        );
    }
}
