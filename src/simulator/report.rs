//! Simulation report generation.

use super::runner::BattleStats;
use crate::battle::Outcome;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from many simulated battles.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub timed_out: u32,

    pub win_rate: f64,
    pub avg_rounds: f64,
    /// Share of all rounds in which the player's unit struck first
    pub first_strike_share: f64,
    pub avg_damage_dealt: f64,
    pub avg_damage_taken: f64,
    /// Averaged over victories only
    pub avg_experience: f64,
    pub level_up_rate: f64,
    pub avg_health_left: f64,

    /// Battle length -> number of battles
    pub rounds_distribution: BTreeMap<u32, u32>,
}

fn share(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl SimReport {
    pub fn from_battles(battles: Vec<BattleStats>) -> Self {
        let num_runs = battles.len() as u32;
        let count = |outcome: Outcome| battles.iter().filter(|b| b.outcome == outcome).count() as u32;
        let victories = count(Outcome::Victory);
        let defeats = count(Outcome::Defeat);
        let timed_out = count(Outcome::Continue);

        let runs = num_runs.max(1) as f64;
        let total_rounds: u32 = battles.iter().map(|b| b.rounds).sum();
        let player_first: u32 = battles.iter().map(|b| b.player_first).sum();
        let avg_damage_dealt = battles.iter().map(|b| b.damage_dealt as f64).sum::<f64>() / runs;
        let avg_damage_taken = battles.iter().map(|b| b.damage_taken as f64).sum::<f64>() / runs;
        let avg_experience = battles
            .iter()
            .filter(|b| b.outcome == Outcome::Victory)
            .map(|b| b.experience_earned as f64)
            .sum::<f64>()
            / victories.max(1) as f64;
        let level_ups = battles.iter().filter(|b| b.leveled_up).count() as u32;
        let avg_health_left = battles.iter().map(|b| b.health_left).sum::<f64>() / runs;

        let mut rounds_distribution = BTreeMap::new();
        for battle in &battles {
            *rounds_distribution.entry(battle.rounds).or_insert(0) += 1;
        }

        Self {
            num_runs,
            victories,
            defeats,
            timed_out,
            win_rate: share(victories, num_runs),
            avg_rounds: total_rounds as f64 / runs,
            first_strike_share: share(player_first, total_rounds),
            avg_damage_dealt,
            avg_damage_taken,
            avg_experience,
            level_up_rate: share(level_ups, num_runs),
            avg_health_left,
            rounds_distribution,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles: {} total, {} won, {} lost, {} called off\n\n",
            self.num_runs, self.victories, self.defeats, self.timed_out
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Avg Rounds:          {:.2}\n", self.avg_rounds));
        report.push_str(&format!(
            "  First-Strike Share:  {:.1}%\n",
            self.first_strike_share * 100.0
        ));
        report.push_str(&format!("  Avg Damage Dealt:    {:.1}\n", self.avg_damage_dealt));
        report.push_str(&format!("  Avg Damage Taken:    {:.1}\n", self.avg_damage_taken));
        report.push_str(&format!(
            "  Avg Health Left:     {:.1}%\n\n",
            self.avg_health_left * 100.0
        ));

        report.push_str("── EXPERIENCE ───────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Per Victory:     {:.1}\n", self.avg_experience));
        report.push_str(&format!(
            "  Level-Up Rate:       {:.1}%\n\n",
            self.level_up_rate * 100.0
        ));

        report.push_str("── BATTLE LENGTH ────────────────────────────────────────────────\n");
        for (rounds, battles) in &self.rounds_distribution {
            let pct = share(*battles, self.num_runs) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:3} rounds: {:>5.1}% {}\n", rounds, pct, bar));
        }

        report.push_str("\n── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.9 {
            "TOO EASY - The player's unit rarely loses"
        } else if self.win_rate > 0.6 {
            "GOOD - Favoured but not safe"
        } else if self.win_rate > 0.4 {
            "EVEN - Coin flip"
        } else {
            "TOO HARD - The opponent usually wins"
        };
        report.push_str(&format!("  Rating: {}\n", rating));
        if self.timed_out > 0 {
            report.push_str("  ⚠️  Some battles hit the round cap\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
