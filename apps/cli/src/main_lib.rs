use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use planledger_core::constants::DEMO_CREDIT;
use planledger_core::events::{format_amount, NotificationKind};
use planledger_core::{LedgerService, LedgerSnapshot, PlanCatalog, Pool, SystemClock};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::commands::{parse_command, Command, HELP};
use crate::config::{Config, LogFormat};
use crate::notifications::TerminalNotificationSink;

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout belongs to the REPL
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Whether the REPL keeps reading after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    service: LedgerService,
    sink: TerminalNotificationSink,
    snapshot_path: Option<PathBuf>,
    demo: bool,
}

impl App {
    pub fn new(service: LedgerService, sink: TerminalNotificationSink, config: &Config) -> Self {
        Self {
            service,
            sink,
            snapshot_path: config.snapshot_path.clone(),
            demo: config.demo,
        }
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    /// Loads the configured snapshot, if one exists on disk.
    pub fn load_snapshot(&mut self) -> anyhow::Result<bool> {
        let Some(path) = self.snapshot_path.as_ref() else {
            return Ok(false);
        };
        match LedgerSnapshot::load_from_path(path)? {
            Some(snapshot) => {
                tracing::info!("Loaded session from {}", path.display());
                self.service.restore(snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Writes the session to the configured snapshot path.
    pub fn save_snapshot(&self) -> anyhow::Result<Option<PathBuf>> {
        let Some(path) = self.snapshot_path.as_ref() else {
            return Ok(None);
        };
        self.service.snapshot().save_to_path(path)?;
        tracing::info!("Saved session to {}", path.display());
        Ok(Some(path.clone()))
    }

    /// Reads commands until EOF or `quit`, saving on the way out.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", HELP)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if self.handle_line(&line, out)? == Flow::Quit {
                break;
            }
        }
        self.save_snapshot()?;
        Ok(())
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "! {}", err)?;
                return Ok(Flow::Continue);
            }
        };
        let flow = self.execute(command, out)?;
        for notification in self.sink.drain() {
            let marker = match notification.kind {
                NotificationKind::Success => "✔",
                NotificationKind::Error => "✘",
            };
            writeln!(out, "{} {}", marker, notification.message)?;
        }
        Ok(flow)
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        // Rejections are reported through the notification sink.
        match command {
            Command::Register { phone } => {
                let _ = self.service.register(&phone);
            }
            Command::Logout => {
                if !self.service.logout() {
                    writeln!(out, "! Nenhuma sessão ativa.")?;
                }
            }
            Command::Deposit {
                amount,
                method,
                reference,
            } => {
                if self.check_method(&method, out)? {
                    if let Ok(tx) = self.service.deposit(amount, &method, reference.as_deref()) {
                        self.write_transfer_instructions(&method, &tx.id, out)?;
                    }
                }
            }
            Command::Withdraw { amount, method } => {
                if self.check_method(&method, out)? {
                    let _ = self.service.withdraw(amount, &method);
                }
            }
            Command::Invest { plan_id } => {
                let _ = self.service.invest(plan_id);
            }
            Command::Plans => write_plans(self.service.plans(), out)?,
            Command::Methods => self.write_methods(out)?,
            Command::Status => self.write_status(out)?,
            Command::History => self.write_history(out)?,
            Command::Demo => {
                if self.demo {
                    let _ = self.service.credit(Pool::Balance, DEMO_CREDIT);
                } else {
                    writeln!(out, "! Modo demo desativado.")?;
                }
            }
            Command::Save => match self.save_snapshot()? {
                Some(path) => writeln!(out, "Sessão guardada em {}", path.display())?,
                None => writeln!(out, "! PLANLEDGER_SNAPSHOT_PATH não configurado.")?,
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn check_method<W: Write>(&self, method: &str, out: &mut W) -> anyhow::Result<bool> {
        if self.service.payment_methods().contains(method) {
            return Ok(true);
        }
        let known: Vec<&str> = self.service.payment_methods().keys().collect();
        writeln!(
            out,
            "! Método '{}' desconhecido. Usa: {}",
            method,
            known.join(", ")
        )?;
        Ok(false)
    }

    fn write_transfer_instructions<W: Write>(
        &self,
        method: &str,
        tx_id: &str,
        out: &mut W,
    ) -> anyhow::Result<()> {
        if let Some(channel) = self.service.payment_methods().get(method) {
            writeln!(
                out,
                "Transfere para {} {} ({}) com a referência {}",
                channel.name, channel.number, channel.owner, tx_id
            )?;
            if !channel.is_configured() {
                write_configure_hint(method, out)?;
            }
        }
        Ok(())
    }

    fn write_methods<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        for (key, channel) in self.service.payment_methods().iter() {
            writeln!(
                out,
                "{:<6} {:<8} {:<12} {}",
                key, channel.name, channel.number, channel.owner
            )?;
            if !channel.is_configured() {
                write_configure_hint(key, out)?;
            }
        }
        Ok(())
    }

    fn write_status<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let Some(account) = self.service.account() else {
            writeln!(out, "! Nenhuma sessão ativa.")?;
            return Ok(());
        };
        writeln!(out, "Telefone:            {}", account.phone)?;
        writeln!(out, "Saldo:               {}", format_amount(account.balance))?;
        writeln!(out, "Bónus:               {}", format_amount(account.bonus))?;
        writeln!(
            out,
            "Ganhos de convite:   {}",
            format_amount(account.referral_earnings)
        )?;
        writeln!(
            out,
            "Disponível p/ levantar: {}",
            format_amount(account.withdrawable())
        )?;
        writeln!(out, "Planos ativos:       {}", account.active_plans.len())?;
        for active in &account.active_plans {
            let name = self
                .service
                .plans()
                .get(active.plan_id)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            writeln!(
                out,
                "  - {} desde {} ({} dias restantes)",
                name,
                active.start_date.format("%Y-%m-%d"),
                active.days_remaining
            )?;
        }
        Ok(())
    }

    fn write_history<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let Some(log) = self.service.transactions() else {
            writeln!(out, "! Nenhuma sessão ativa.")?;
            return Ok(());
        };
        for tx in log.iter() {
            writeln!(
                out,
                "{}  {:<10} {:>14}  {:<9} {:<6} {}",
                tx.date.format("%Y-%m-%d %H:%M"),
                tx.transaction_type.as_str(),
                format_amount(tx.amount),
                tx.status.as_str(),
                tx.method.as_deref().unwrap_or("-"),
                tx.id
            )?;
        }
        Ok(())
    }
}

fn write_configure_hint<W: Write>(key: &str, out: &mut W) -> anyhow::Result<()> {
    let upper = key.to_ascii_uppercase();
    writeln!(
        out,
        "       define PLANLEDGER_{0}_NUMBER e PLANLEDGER_{0}_OWNER para configurar",
        upper
    )?;
    Ok(())
}

fn write_plans<W: Write>(catalog: &PlanCatalog, out: &mut W) -> anyhow::Result<()> {
    for plan in catalog.iter() {
        writeln!(
            out,
            "{:>2}  {:<22} {:>10}  {:>9}/dia  {} dias  total {}",
            plan.id,
            plan.name,
            format_amount(plan.price),
            format_amount(plan.daily_return),
            plan.duration,
            format_amount(plan.total_return())
        )?;
    }
    Ok(())
}

/// Wires the ledger service from config.
pub fn build_app(config: &Config) -> anyhow::Result<App> {
    let sink = TerminalNotificationSink::new();
    let service = LedgerService::new(
        config.policy.clone(),
        PlanCatalog::default(),
        Arc::new(SystemClock::new(config.tz)),
        Arc::new(sink.clone()),
    )?
    .with_payment_methods(config.payment_methods.clone());
    tracing::info!(
        "Ledger ready (tz {}, min deposit {}, min withdrawal {})",
        config.tz,
        config.policy.min_deposit,
        config.policy.min_withdrawal
    );
    Ok(App::new(service, sink, config))
}
