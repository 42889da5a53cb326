use std::io::{self, BufRead, Write};

use crate::core::{Ledger, MemberId, format_currency, projected_payout};

const HELP: &str = "\
commands:
  register <tierId> <amount> <name...>  add a member (tier1, tier2, tier3)
  advance                               move the clock forward one week
  withdraw <memberId>                   remove a member
  show                                  print the dashboard
  tiers                                 list the tiers
  help                                  this text
  quit                                  leave the session";

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Register {
        tier_id: &'a str,
        amount: &'a str,
        name: String,
    },
    Advance,
    Withdraw(&'a str),
    Show,
    Tiers,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Option<Command<'_>> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let command = match head {
        "register" => Command::Register {
            tier_id: words.next().unwrap_or_default(),
            amount: words.next().unwrap_or_default(),
            name: words.collect::<Vec<_>>().join(" "),
        },
        "advance" => Command::Advance,
        "withdraw" => Command::Withdraw(words.next().unwrap_or_default()),
        "show" => Command::Show,
        "tiers" => Command::Tiers,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other),
    };
    Some(command)
}

pub fn run<R: BufRead, W: Write>(ledger: &mut Ledger, input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "Savings group, week {}. Type `help` for commands.", ledger.current_week())?;
    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            continue;
        };
        match command {
            Command::Register {
                tier_id,
                amount,
                name,
            } => match ledger.register(&name, tier_id, amount) {
                Ok(member) => writeln!(
                    out,
                    "registered {} ({}) as {}",
                    member.name, member.tier_id, member.id
                )?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Advance => {
                let week = ledger.advance_week();
                writeln!(out, "week {week}")?;
            }
            Command::Withdraw(raw) => match raw.parse::<MemberId>() {
                Ok(id) => {
                    let week = ledger.current_week();
                    let leaving = ledger
                        .member(id)
                        .map(|m| (m.name.clone(), projected_payout(m, week)));
                    ledger.withdraw(id);
                    match leaving {
                        Some((name, payout)) => writeln!(
                            out,
                            "withdrew {name}, payout {}",
                            format_currency(payout)
                        )?,
                        None => writeln!(out, "no member {id}")?,
                    }
                }
                Err(_) => writeln!(out, "no member {raw}")?,
            },
            Command::Show => write_dashboard(ledger, &mut out)?,
            Command::Tiers => {
                for info in ledger.snapshot().tiers {
                    writeln!(out, "  {:<6} {}", info.id, info.description)?;
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(word) => writeln!(out, "unknown command `{word}`\n{HELP}")?,
        }
    }
    Ok(())
}

fn write_dashboard<W: Write>(ledger: &Ledger, out: &mut W) -> io::Result<()> {
    let snapshot = ledger.snapshot();
    writeln!(
        out,
        "week {}  open slots {}/{}",
        snapshot.current_week, snapshot.open_slots, snapshot.capacity
    )?;
    writeln!(
        out,
        "principal {}  weekly interest {}  projected payout {}",
        snapshot.totals_display.total_principal,
        snapshot.totals_display.total_weekly_interest,
        snapshot.totals_display.total_projected_payout
    )?;
    for row in &snapshot.members {
        writeln!(
            out,
            "  {}  {:<16} joined wk {:<3} {:<6} {:>9} +{:>7}/wk  payout {:>9}",
            row.id,
            row.name,
            row.join_week,
            row.tier_name,
            row.deposit_display,
            row.weekly_interest_display,
            row.projected_payout_display
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(ledger: &mut Ledger, script: &str) -> String {
        let mut out = Vec::new();
        run(ledger, script.as_bytes(), &mut out).expect("in-memory io");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn parse_command_splits_register_arguments() {
        assert_eq!(
            parse_command("register tier2 20000 Ada  Lovelace"),
            Some(Command::Register {
                tier_id: "tier2",
                amount: "20000",
                name: "Ada Lovelace".to_string(),
            })
        );
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("dance"), Some(Command::Unknown("dance")));
    }

    #[test]
    fn session_registers_advances_and_reports_errors() {
        let mut ledger = Ledger::new();
        let output = run_script(
            &mut ledger,
            "register tier3 30000 Ada\nregister tier2 10000 Bo\nregister tier1 10000\nadvance\nshow\n",
        );

        assert!(output.contains("registered Ada (tier3)"));
        assert!(output.contains("error: Deposit must be exactly $20,000 for the selected tier."));
        assert!(output.contains("error: Please enter the member's name."));
        assert!(output.contains("week 2"));
        assert!(output.contains("open slots 11/12"));
        assert!(output.contains("projected payout $42,000"));
        assert_eq!(ledger.members().len(), 1);
    }

    #[test]
    fn session_withdraw_reports_payout_and_stops_on_quit() {
        let mut ledger = Ledger::new();
        let id = ledger
            .register("Ada", "tier1", "10000")
            .expect("valid registration")
            .id;
        let output = run_script(
            &mut ledger,
            &format!("withdraw {id}\nwithdraw {id}\nquit\nadvance\n"),
        );

        assert!(output.contains("withdrew Ada, payout $10,500"));
        assert!(output.contains(&format!("no member {id}")));
        assert!(ledger.members().is_empty());
        assert_eq!(ledger.current_week(), 1);
    }
}
