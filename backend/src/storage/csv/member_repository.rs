//! # CSV Member Repository
//!
//! File-based storage for the rotation queue. All members live in a single
//! `members.csv` at the root of the data directory:
//!
//! ```text
//! data/
//! └── members.csv    ← This module manages this file
//! ```
//!
//! ```text
//! id,name,rotation_rank,remote_weekday,created_at
//! member::5f0c…,Ana,1,monday,2023-10-02T09:00:00+00:00
//! member::a41e…,Bruno,2,,2023-10-02T09:05:00+00:00
//! ```
//!
//! Rows are returned sorted by `rotation_rank`. Writes go to a temp file
//! that is then renamed over the original.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tokio::task;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::member::{next_rotation_rank, normalize_member_name};
use crate::domain::models::{Member, RemoteWeekday};
use crate::storage::MemberStorage;

const HEADER: [&str; 5] = ["id", "name", "rotation_rank", "remote_weekday", "created_at"];

/// One row of `members.csv`
#[derive(Debug, Serialize, Deserialize)]
struct MemberRecord {
    id: String,
    name: String,
    rotation_rank: u32,
    remote_weekday: Option<RemoteWeekday>,
    created_at: String,
}

impl MemberRecord {
    fn from_member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            rotation_rank: member.rotation_rank,
            remote_weekday: member.remote_weekday,
            created_at: member.created_at.to_rfc3339(),
        }
    }

    fn into_member(self) -> Result<Member> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .with_context(|| format!("Invalid created_at for member {}", self.id))?
            .with_timezone(&Utc);

        Ok(Member {
            id: self.id,
            name: self.name,
            rotation_rank: self.rotation_rank,
            remote_weekday: self.remote_weekday,
            created_at,
        })
    }
}

/// CSV-based member repository
#[derive(Clone)]
pub struct MemberRepository {
    connection: CsvConnection,
}

impl MemberRepository {
    /// Create a new CSV member repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all members from the CSV file, sorted by rotation rank
    fn read_members(&self) -> Result<Vec<Member>> {
        self.connection.ensure_members_file_exists()?;

        let file_path = self.connection.members_file_path();
        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ReaderBuilder::new().from_reader(BufReader::new(file));

        let mut members = Vec::new();
        for (line, result) in csv_reader.deserialize::<MemberRecord>().enumerate() {
            let record = result.with_context(|| format!("Malformed member row {}", line + 1))?;
            members.push(record.into_member()?);
        }

        members.sort_by_key(|m| m.rotation_rank);
        debug!("Read {} members from {}", members.len(), file_path.display());
        Ok(members)
    }

    /// Write all members to the CSV file
    fn write_members(&self, members: &[Member]) -> Result<()> {
        let file_path = self.connection.members_file_path();

        // Create a temporary file for atomic write
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;

            // Header is written by hand so an empty queue still has one
            let mut csv_writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(file));

            csv_writer.write_record(HEADER)?;
            for member in members {
                csv_writer.serialize(MemberRecord::from_member(member))?;
            }

            csv_writer.flush()?;
        }

        // Atomic move from temp to final file
        std::fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        Ok(())
    }

    /// Append a member after the highest rank, rewriting the file
    fn append(&self, name: &str, remote_weekday: Option<RemoteWeekday>) -> Result<Member> {
        let name = normalize_member_name(name)?;
        let mut members = self.read_members()?;

        let member = Member {
            id: Member::generate_id(),
            name,
            rotation_rank: next_rotation_rank(&members),
            remote_weekday,
            created_at: Utc::now(),
        };

        members.push(member.clone());
        self.write_members(&members)?;

        info!(
            "Appended member {} ({}) at rank {}",
            member.name, member.id, member.rotation_rank
        );
        Ok(member)
    }
}

// File access is blocking, so it runs on tokio's blocking pool
#[async_trait]
impl MemberStorage for MemberRepository {
    async fn list_members(&self) -> Result<Vec<Member>> {
        let repository = self.clone();
        task::spawn_blocking(move || repository.read_members())
            .await
            .context("Member read task failed")?
    }

    async fn append_member(
        &self,
        name: &str,
        remote_weekday: Option<RemoteWeekday>,
    ) -> Result<Member> {
        let repository = self.clone();
        let name = name.to_string();
        task::spawn_blocking(move || repository.append(&name, remote_weekday))
            .await
            .context("Member append task failed")?
    }
}
