//! Task descriptors — one `TaskSpec` per supported task.
//!
//! The five tasks share a single control flow. Everything that differs between
//! them (fields, defaults, templates, response key) lives in the descriptor.

use std::fmt;

use serde::Serialize;

use crate::assistant::prompts;

/// The five operations a request can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    FindJobs,
    WriteEmail,
    EvaluateCv,
    CreateCv,
    FindCompanies,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::FindJobs,
        TaskKind::WriteEmail,
        TaskKind::EvaluateCv,
        TaskKind::FindCompanies,
        TaskKind::CreateCv,
    ];

    /// Identifier the classifier is asked to answer with.
    pub fn id(self) -> &'static str {
        match self {
            TaskKind::FindJobs => "find_jobs",
            TaskKind::WriteEmail => "write_email",
            TaskKind::EvaluateCv => "evaluate_cv",
            TaskKind::CreateCv => "create_cv",
            TaskKind::FindCompanies => "find_companies",
        }
    }

    /// Literal match against an already-normalized identifier.
    pub fn from_id(id: &str) -> Option<TaskKind> {
        TaskKind::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn spec(self) -> &'static TaskSpec {
        match self {
            TaskKind::FindJobs => &FIND_JOBS,
            TaskKind::WriteEmail => &WRITE_EMAIL,
            TaskKind::EvaluateCv => &EVALUATE_CV,
            TaskKind::CreateCv => &CREATE_CV,
            TaskKind::FindCompanies => &FIND_COMPANIES,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// Value used when extraction does not supply a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Literal(&'static str),
    /// Echo the raw user query.
    Query,
    Zero,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key in the extraction JSON and placeholder name in the task template.
    pub name: &'static str,
    /// Key in the direct-API request body.
    pub wire_name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

impl FieldSpec {
    const fn text(name: &'static str, default: FieldDefault) -> Self {
        Self {
            name,
            wire_name: name,
            kind: FieldKind::Text,
            default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputGenre {
    Html,
    Text,
}

#[derive(Debug)]
pub struct TaskSpec {
    pub kind: TaskKind,
    pub fields: &'static [FieldSpec],
    pub extraction_template: &'static str,
    pub task_template: &'static str,
    pub genre: OutputGenre,
    /// JSON key the direct endpoint wraps its answer in.
    pub response_key: &'static str,
}

static FIND_JOBS: TaskSpec = TaskSpec {
    kind: TaskKind::FindJobs,
    fields: &[
        FieldSpec {
            name: "job_description",
            wire_name: "jobDescription",
            kind: FieldKind::Text,
            default: FieldDefault::Query,
        },
        FieldSpec::text("salary", FieldDefault::Literal("")),
        FieldSpec::text("location", FieldDefault::Literal("")),
        FieldSpec {
            name: "experience",
            wire_name: "experience",
            kind: FieldKind::Integer,
            default: FieldDefault::Zero,
        },
    ],
    extraction_template: prompts::FIND_JOBS_EXTRACTION,
    task_template: prompts::FIND_JOBS_TASK,
    genre: OutputGenre::Html,
    response_key: "result",
};

static WRITE_EMAIL: TaskSpec = TaskSpec {
    kind: TaskKind::WriteEmail,
    fields: &[
        FieldSpec::text("job_title", FieldDefault::Literal("Vị trí ứng tuyển")),
        FieldSpec::text("company", FieldDefault::Literal("Công ty")),
        FieldSpec::text("skills", FieldDefault::Query),
    ],
    extraction_template: prompts::WRITE_EMAIL_EXTRACTION,
    task_template: prompts::WRITE_EMAIL_TASK,
    genre: OutputGenre::Text,
    response_key: "email",
};

static EVALUATE_CV: TaskSpec = TaskSpec {
    kind: TaskKind::EvaluateCv,
    fields: &[
        FieldSpec::text("cv_text", FieldDefault::Query),
        FieldSpec::text("job_description", FieldDefault::Literal("")),
    ],
    extraction_template: prompts::EVALUATE_CV_EXTRACTION,
    task_template: prompts::EVALUATE_CV_TASK,
    genre: OutputGenre::Text,
    response_key: "evaluation",
};

static CREATE_CV: TaskSpec = TaskSpec {
    kind: TaskKind::CreateCv,
    fields: &[
        FieldSpec::text("name", FieldDefault::Literal("Nguyễn Văn A")),
        FieldSpec::text("email", FieldDefault::Literal("example@email.com")),
        FieldSpec::text("phone", FieldDefault::Literal("")),
        FieldSpec::text("education", FieldDefault::Literal("")),
        // Free-text work history here, unlike the job-search integer.
        FieldSpec::text("experience", FieldDefault::Query),
        FieldSpec::text("skills", FieldDefault::Literal("")),
    ],
    extraction_template: prompts::CREATE_CV_EXTRACTION,
    task_template: prompts::CREATE_CV_TASK,
    genre: OutputGenre::Text,
    response_key: "cv",
};

static FIND_COMPANIES: TaskSpec = TaskSpec {
    kind: TaskKind::FindCompanies,
    fields: &[
        FieldSpec::text("skills", FieldDefault::Query),
        FieldSpec::text("industry", FieldDefault::Literal("Công nghệ thông tin")),
        FieldSpec::text("location", FieldDefault::Literal("")),
    ],
    extraction_template: prompts::FIND_COMPANIES_EXTRACTION,
    task_template: prompts::FIND_COMPANIES_TASK,
    genre: OutputGenre::Text,
    response_key: "companies",
};
