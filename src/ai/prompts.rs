use std::fmt::Write;

use super::{CoachContext, MenuContext};
use crate::nutrition::DailyTargets;

/// Most recent meals quoted to the coach.
pub const COACH_MEAL_WINDOW: usize = 15;
/// Most recent measurements quoted to the coach.
pub const COACH_MEASUREMENT_WINDOW: usize = 5;

pub fn meal_analysis(description: &str) -> String {
    format!(
        "Analyse the nutritional content of the following dish or food: \"{description}\". \
         Give estimated values based on standard portions."
    )
}

fn targets_block(targets: Option<&DailyTargets>) -> String {
    match targets {
        Some(t) => format!(
            "- BMR: {:.0} kcal\n- TDEE: {:.0} kcal\n- Calorie target: {:.0} kcal{}\n\
             - Protein target: {:.0} g\n- Fat target: {:.0} g\n- Carb target: {:.0} g\n\
             - Training day: {}",
            t.bmr,
            t.tdee,
            t.target_calories,
            if t.is_safe_limited { " (raised to the safety floor)" } else { "" },
            t.protein_g,
            t.fat_g,
            t.carbs_g,
            if t.is_exercise_day { "yes" } else { "no" },
        ),
        None => "No targets available".to_string(),
    }
}

fn or_none(text: &str) -> &str {
    if text.trim().is_empty() {
        "none"
    } else {
        text
    }
}

pub fn coach_advice(ctx: &CoachContext) -> String {
    let p = &ctx.profile;

    let skip = ctx.meals.len().saturating_sub(COACH_MEAL_WINDOW);
    let mut meals = String::new();
    for m in &ctx.meals[skip..] {
        let _ = writeln!(
            meals,
            "- {} [{}] {}: {} ({:.0} kcal)",
            m.date, m.time, m.meal_type, m.description, m.nutrition.calories
        );
    }
    if meals.is_empty() {
        meals.push_str("No meals logged\n");
    }

    let skip = ctx.measurements.len().saturating_sub(COACH_MEASUREMENT_WINDOW);
    let mut history = String::new();
    for m in &ctx.measurements[skip..] {
        let fat = m
            .body_fat_pct
            .map(|f| format!("{f:.1}%"))
            .unwrap_or_else(|| "n/a".into());
        let _ = writeln!(history, "- Date: {}, Weight: {:.1} kg, Body fat: {}", m.date, m.weight_kg, fat);
    }
    if history.is_empty() {
        history.push_str("No previous measurements\n");
    }

    let body_fat = p
        .body_fat_pct
        .map(|f| format!("{f:.1}%"))
        .unwrap_or_else(|| "not specified".into());

    format!(
        "Act as an expert nutritionist and health coach. \
         Keep formatting clean and avoid heavy Markdown.\n\n\
         User profile:\n\
         - Name: {name}\n- Age: {age} years\n- Height: {height:.0} cm\n- Current weight: {weight:.1} kg\n\
         - Body fat: {body_fat}\n- Activity: {activity}\n- Goal: {goal}\n\
         - Allergies/intolerances: {allergies}, {intolerances}\n- Notes: {notes}\n\n\
         Daily targets:\n{targets}\n\n\
         Measurement history:\n{history}\n\
         Meal log (with times):\n{meals}\n\
         Based on this profile, give an analysis:\n\
         1. OVERALL: what is going well?\n\
         2. IMPROVEMENTS: where is the user falling short of the goal and meal timing?\n\
         3. PRACTICAL ACTIONS: specific advice on portions, foods and schedule changes.\n\
         4. ALERTS: allergies or body-fat concerns if relevant.\n\n\
         Use professional but friendly language.",
        name = or_none(&p.name),
        age = p.age_years,
        height = p.height_cm,
        weight = p.weight_kg,
        activity = p.activity_level,
        goal = p.goal,
        allergies = or_none(&p.allergies),
        intolerances = or_none(&p.intolerances),
        notes = or_none(&p.considerations),
        targets = targets_block(ctx.targets.as_ref()),
    )
}

pub fn menu(ctx: &MenuContext) -> String {
    let mut prompt = format!(
        "Act as a chef-nutritionist. Using mainly these pantry items: {}.\n\
         Propose interchangeable options: several breakfasts, snacks, lunches and dinners, \
         plus a short list of shopping suggestions that would round out the week.\n",
        ctx.pantry.join(", ")
    );
    if let Some(p) = &ctx.profile {
        let _ = write!(
            prompt,
            "The user's goal is {}. Allergies: {}. Intolerances: {}. Notes: {}.\n",
            p.goal,
            or_none(&p.allergies),
            or_none(&p.intolerances),
            or_none(&p.considerations),
        );
    }
    if let Some(t) = &ctx.targets {
        let _ = write!(
            prompt,
            "Aim for roughly {:.0} kcal per day with {:.0} g protein, {:.0} g fat and {:.0} g carbohydrates.\n",
            t.target_calories, t.protein_g, t.fat_g, t.carbs_g
        );
    }
    prompt
}
