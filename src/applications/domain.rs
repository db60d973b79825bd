use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for users, seekers and recruiters alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for applications embedded in a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Recruiter-authored fields for a new posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A posting together with the applications it owns.
///
/// Applications are embedded so the duplicate check and the append share one
/// transactional unit at the store boundary. The keyword set is derived from
/// the text fields on demand and never stored, so recruiter edits do not
/// retroactively change scores already recorded on applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: String,
    pub requirements: Vec<String>,
    pub tags: Vec<String>,
    pub posted_by: UserId,
    pub posted_at: DateTime<Utc>,
    pub applications: Vec<Application>,
}

impl Job {
    pub fn application(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|candidate| &candidate.id == id)
    }

    pub fn has_application_from(&self, user: &UserId) -> bool {
        self.applications
            .iter()
            .any(|candidate| &candidate.applicant == user)
    }
}

/// Seeker-supplied payload for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Explicit skill list; when empty the applicant's profile skills are
    /// snapshotted instead.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// One seeker's submission against one posting.
///
/// The skill list is a snapshot resolved at submission time; later profile
/// edits never touch it. Score and matched keywords are frozen at creation,
/// only `status` mutates afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub applicant: UserId,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub resume_text: Option<String>,
    pub skills: Vec<String>,
    pub match_score: u8,
    pub matched_keywords: Vec<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub notified: bool,
}

/// Lifecycle states an application can occupy. Any state is reachable from
/// any other; the board deliberately imposes no workflow ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Reviewing,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }

    /// Parses a wire value, returning `None` for anything outside the fixed
    /// enumeration.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "applied" => Some(Self::Applied),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            "hired" => Some(Self::Hired),
            _ => None,
        }
    }
}

/// Caller roles as supplied by the upstream authorization layer. The core
/// never checks credentials, only role equality and posting ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seeker,
    Recruiter,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "seeker" => Some(Self::Seeker),
            "recruiter" => Some(Self::Recruiter),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    /// Posting-level management rights: the owner or an admin.
    pub fn can_manage(&self, job: &Job) -> bool {
        self.role == Role::Admin || job.posted_by == self.id
    }
}
