// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use clap::Parser;
use hireflow::{
    api::{
        jobs::{Application, Apply, Resume},
        Executor as _,
    },
    error::{Error, Result},
};
use log::error;

/// Apply to a job posting.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    cover_letter: Option<String>,

    /// A résumé to attach (PDF or Word).
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    resume: Option<PathBuf>,

    /// The job to apply to.
    #[clap()]
    job_id: String,
}

fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

fn load_resume(path: PathBuf) -> Result<Resume> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            error!("The résumé path {} does not name a file", path.display());
            Error::Command
        })?;

    Ok(Resume {
        bytes: fs::read(&path)?,
        content_type: content_type(&path).to_owned(),
        file_name,
    })
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &super::Context) -> Result<()> {
        let resume = self.resume.map(load_resume).transpose()?;

        let receipt = Apply {
            job_id: self.job_id,
            application: Application {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone: self.phone,
                cover_letter: self.cover_letter,
                resume,
            },
        }
        .execute(ctx.store.gateway())
        .await?;

        match (receipt.message, receipt.application) {
            (Some(message), _) => println!("{message}"),
            (None, Some(application)) => println!("Application {} submitted", application.id),
            (None, None) => println!("Application submitted"),
        }
        Ok(())
    }
}
