//! Intern portal command-line interface.

use std::{io::Write, path::PathBuf};

use clap::{Parser, Subcommand};

use anyhow::Error;

use intern_portal_model::{MergeRules, Participant, ViewerIdentity, leaderboard::merge_and_rank};

use crate::remote::RemoteClient;

/// The command line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// The command to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Operational commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generates a key for encrypting cookies.
    GenerateKey,
    #[command(name = "dump")]
    DumpLeaderboard(DumpLeaderboard),
}

/// Dumps the ranked leaderboard as CSV.
#[derive(clap::Args, Debug)]
pub struct DumpLeaderboard {
    /// The display name to fold into the leaderboard as the current user.
    #[arg(long = "as")]
    pub display_name: Option<String>,
}

/// Fetches, ranks and writes the leaderboard.
pub async fn dump_leaderboard<W: Write>(
    command: &DumpLeaderboard,
    remote: &RemoteClient,
    rules: &MergeRules,
    writer: W,
) -> Result<(), Error> {
    let viewer = command
        .display_name
        .as_deref()
        .map(ViewerIdentity::new)
        .unwrap_or_default();

    let participants = remote.fetch_leaderboard().await?;

    tracing::info!(count = participants.len(), "fetched leaderboard");

    write_leaderboard_csv(writer, &merge_and_rank(participants, &viewer, rules))
}

/// Writes a ranked leaderboard as CSV.
pub fn write_leaderboard_csv<W: Write>(
    mut writer: W,
    ranked: &[Participant],
) -> Result<(), Error> {
    // Write header
    writer.write_all(b"Rank,Name,Donations\n")?;

    for (ix, participant) in ranked.iter().enumerate() {
        let csv_name = participant.name.replace('"', "\"\"");

        writeln!(
            writer,
            "{},\"{}\",{}",
            ix + 1,
            csv_name,
            participant.donations
        )?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_leaderboard_csv() {
        let ranked = vec![
            Participant::new("Nadia", 4200),
            Participant::new("Amal \"The Closer\"", 1200),
        ];

        let mut out = Vec::new();
        write_leaderboard_csv(&mut out, &ranked).expect("in-memory write");

        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "Rank,Name,Donations\n1,\"Nadia\",4200\n2,\"Amal \"\"The Closer\"\"\",1200\n"
        );
    }
}
