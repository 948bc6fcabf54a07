//! Line-oriented command parsing.

use std::str::FromStr;

use planledger_core::PlanId;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { phone: String },
    Logout,
    Deposit {
        amount: Decimal,
        method: String,
        reference: Option<String>,
    },
    Withdraw { amount: Decimal, method: String },
    Invest { plan_id: PlanId },
    Plans,
    Methods,
    Status,
    History,
    Demo,
    Save,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' takes fewer arguments")]
    TooManyArguments(&'static str),

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    #[error("'{0}' is not a valid plan id")]
    InvalidPlanId(String),
}

pub const HELP: &str = "\
Comandos:
  register <telefone>                 criar conta e receber o bónus
  logout                              terminar sessão
  deposit <valor> <método> [ref]      pedir depósito (mpesa, emola)
                                      valores como 1.500 ou 1.234,50
  withdraw <valor> <método>           pedir levantamento
  invest <plano>                      investir num plano
  plans                               listar planos
  methods                             contas para transferência
  status                              saldos e planos ativos
  history                             histórico de transações
  demo                                adicionar saldo de demonstração
  save                                guardar sessão
  help                                esta ajuda
  quit                                sair";

/// Parses one input line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let name = parts.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    let command = match name.as_str() {
        "register" | "login" => {
            let phone = required(&args, 0, "register", "a phone number")?;
            no_more(&args, 1, "register")?;
            Command::Register {
                phone: phone.to_string(),
            }
        }
        "logout" => bare(&args, "logout", Command::Logout)?,
        "deposit" => {
            let amount = parse_amount(required(&args, 0, "deposit", "an amount")?)?;
            let method = required(&args, 1, "deposit", "a payment method")?;
            no_more(&args, 3, "deposit")?;
            Command::Deposit {
                amount,
                method: method.to_ascii_lowercase(),
                reference: args.get(2).map(|r| r.to_string()),
            }
        }
        "withdraw" => {
            let amount = parse_amount(required(&args, 0, "withdraw", "an amount")?)?;
            let method = required(&args, 1, "withdraw", "a payment method")?;
            no_more(&args, 2, "withdraw")?;
            Command::Withdraw {
                amount,
                method: method.to_ascii_lowercase(),
            }
        }
        "invest" => {
            let raw = required(&args, 0, "invest", "a plan id")?;
            no_more(&args, 1, "invest")?;
            let plan_id = raw
                .parse::<PlanId>()
                .map_err(|_| CommandError::InvalidPlanId(raw.to_string()))?;
            Command::Invest { plan_id }
        }
        "plans" => bare(&args, "plans", Command::Plans)?,
        "methods" => bare(&args, "methods", Command::Methods)?,
        "status" => bare(&args, "status", Command::Status)?,
        "history" => bare(&args, "history", Command::History)?,
        "demo" => bare(&args, "demo", Command::Demo)?,
        "save" => bare(&args, "save", Command::Save)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Parses an amount written the way it is displayed: `.` groups thousands and
/// `,` is the decimal mark, so `5.000` is five thousand and `1.234,50` has
/// cents. Groups after a `.` must have exactly three digits, which rejects
/// `1.5` and `300.50` instead of misreading them.
fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    let invalid = || CommandError::InvalidAmount(raw.to_string());
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    let (integer, fraction) = match raw.split_once(',') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (raw, None),
    };

    let mut groups = integer.split('.');
    let head = groups.next().unwrap_or_default();
    let mut digits = head.to_string();
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return Err(invalid());
        }
        digits.push_str(group);
        grouped = true;
    }
    if !all_digits(head) || (grouped && head.len() > 3) {
        return Err(invalid());
    }

    if let Some(fraction) = fraction {
        if !all_digits(fraction) {
            return Err(invalid());
        }
        digits.push('.');
        digits.push_str(fraction);
    }
    Decimal::from_str(&digits).map_err(|_| invalid())
}

fn required<'a>(
    args: &[&'a str],
    idx: usize,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    args.get(idx)
        .copied()
        .ok_or(CommandError::MissingArgument { command, argument })
}

fn no_more(args: &[&str], max: usize, command: &'static str) -> Result<(), CommandError> {
    if args.len() > max {
        return Err(CommandError::TooManyArguments(command));
    }
    Ok(())
}

fn bare(args: &[&str], command: &'static str, parsed: Command) -> Result<Command, CommandError> {
    no_more(args, 0, command)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_register() {
        assert_eq!(
            parse_command("register 841234567").unwrap(),
            Command::Register {
                phone: "841234567".to_string()
            }
        );
        assert_eq!(
            parse_command("register"),
            Err(CommandError::MissingArgument {
                command: "register",
                argument: "a phone number"
            })
        );
    }

    #[test]
    fn test_parse_deposit_with_reference() {
        assert_eq!(
            parse_command("deposit 300,50 MPESA QX12ABC").unwrap(),
            Command::Deposit {
                amount: dec!(300.50),
                method: "mpesa".to_string(),
                reference: Some("QX12ABC".to_string()),
            }
        );
        assert_eq!(
            parse_command("deposit 500 emola").unwrap(),
            Command::Deposit {
                amount: dec!(500),
                method: "emola".to_string(),
                reference: None,
            }
        );
    }

    #[test]
    fn test_parse_amount_thousands_grouping() {
        assert_eq!(parse_amount("5.000"), Ok(dec!(5000)));
        assert_eq!(parse_amount("300.000"), Ok(dec!(300000)));
        assert_eq!(parse_amount("1.234.567"), Ok(dec!(1234567)));
        assert_eq!(parse_amount("1500"), Ok(dec!(1500)));
    }

    #[test]
    fn test_parse_amount_decimal_comma() {
        assert_eq!(parse_amount("1.234,50"), Ok(dec!(1234.50)));
        assert_eq!(parse_amount("0,5"), Ok(dec!(0.5)));
        assert_eq!(parse_amount("300,50"), Ok(dec!(300.50)));
    }

    #[test]
    fn test_parse_amount_rejects_ambiguous_input() {
        for raw in ["1.5", "300.50", "1234.567", ".500", "1.", "1,2,3", "1,", "-5", "5.000,x"] {
            assert_eq!(
                parse_amount(raw),
                Err(CommandError::InvalidAmount(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_amount_typed_as_displayed_keeps_its_value() {
        assert_eq!(
            parse_command("withdraw 1.500 mpesa").unwrap(),
            Command::Withdraw {
                amount: dec!(1500),
                method: "mpesa".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_withdraw() {
        assert_eq!(
            parse_command("  Withdraw   150 emola ").unwrap(),
            Command::Withdraw {
                amount: dec!(150),
                method: "emola".to_string(),
            }
        );
        assert_eq!(
            parse_command("withdraw lots mpesa"),
            Err(CommandError::InvalidAmount("lots".to_string()))
        );
        assert_eq!(
            parse_command("withdraw 150 mpesa extra"),
            Err(CommandError::TooManyArguments("withdraw"))
        );
    }

    #[test]
    fn test_parse_invest() {
        assert_eq!(
            parse_command("invest 3").unwrap(),
            Command::Invest { plan_id: 3 }
        );
        assert_eq!(
            parse_command("invest -1"),
            Err(CommandError::InvalidPlanId("-1".to_string()))
        );
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse_command("status").unwrap(), Command::Status);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert_eq!(
            parse_command("status now"),
            Err(CommandError::TooManyArguments("status"))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("transfer 10"),
            Err(CommandError::Unknown("transfer".to_string()))
        );
    }
}
