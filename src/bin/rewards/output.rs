// Terminal tables for the rewards CLI

use arena_rewards::conservation::ConservationReport;
use arena_rewards::payout::PayoutLedger;
use arena_rewards::report::{label, ReportRow};
use arena_rewards::Allocation;

pub fn print_allocation(allocation: &Allocation, rows: &[ReportRow], conservation: &ConservationReport) {
    let split = &allocation.tier_split;

    println!("\n  Step 1: tier split");
    println!("    Node direct stake:       {:>16.2}", split.node_direct_total);
    println!("    Validator direct stake:  {:>16.2}", split.validator_direct_total);
    println!("    Fraction to nodes:       {:>16.6}", split.fraction_nodes);
    println!("    Training node rewards:   {:>16.6}", allocation.training_tier_reward);
    println!("    Validator rewards:       {:>16.6}", allocation.validator_tier_reward);

    println!("\n  Steps 2-3: participants");
    println!(
        "  {:<14} {:>12} {:>12} {:>10} {:>6} {:>10} {:>16} {:>16} {:>16}",
        "Participant", "Direct", "Delegated", "Score", "Sigma", "Fraction", "Total", "Owner", "Delegators"
    );
    println!("  {}", "-".repeat(122));
    for row in rows {
        println!(
            "  {:<14} {:>12.2} {:>12.2} {:>10.6} {:>6.2} {:>10.6} {:>16.6} {:>16.6} {:>16.6}",
            row.label,
            row.direct_stake,
            row.delegator_stake,
            row.performance,
            row.sigma,
            row.fraction,
            row.total_reward,
            row.owner_reward,
            row.delegator_reward,
        );
    }

    let diagnostics = &allocation.diagnostics;
    if !diagnostics.score_checks.is_empty() || !diagnostics.degenerate.is_empty() {
        println!("\n  Diagnostics:");
        for check in &diagnostics.score_checks {
            let status = if check.within_tolerance { "OK" } else { "MUST BE 1" };
            println!("    {} score sum: {:.6} ({})", check.tier, check.sum, status);
        }
        for d in &diagnostics.degenerate {
            println!("    {}", d);
        }
    }

    println!(
        "\n  Conservation: {} (pool error {:.2e}, max split error {:.2e}, forfeited {:.6})\n",
        if conservation.balanced { "BALANCED" } else { "VIOLATED" },
        conservation.pool_error,
        conservation.max_split_error,
        conservation.forfeited,
    );
}

pub fn print_ledger(ledger: &PayoutLedger) {
    println!("\n  Payout ledger ({} decimals)", ledger.decimals);
    println!("  {:<14} {:>20} {:>20}", "Participant", "Owner", "Delegators");
    println!("  {}", "-".repeat(56));
    for entry in &ledger.entries {
        println!(
            "  {:<14} {:>20} {:>20}",
            label(entry.tier, entry.index),
            entry.owner,
            entry.delegator
        );
    }
    println!("  {}", "-".repeat(56));
    println!("  Pool:          {:>20}", ledger.pool);
    println!("  Distributed:   {:>20}", ledger.distributed);
    println!("  Undistributed: {:>20} (forfeited {})\n", ledger.undistributed, ledger.forfeited);
}
