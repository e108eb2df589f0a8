//! Three-level category masters (System → Major → Minor) scoped to a project.

use super::{
    MajorCategoryId, MinorCategoryId, ProjectId, SystemCategoryId, TaskDomainError,
    text::bounded_text,
};
use serde::{Deserialize, Serialize};

/// Maximum category code length, matching `VARCHAR(20)`.
const MAX_CODE_LENGTH: usize = 20;

/// Maximum category name length, matching `VARCHAR(100)`.
const MAX_NAME_LENGTH: usize = 100;

/// Validated code and display name shared by every category level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    code: String,
    name: String,
}

impl CategoryLabel {
    /// Creates a validated label.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyField`] or
    /// [`TaskDomainError::FieldTooLong`] when either value is blank or too
    /// long.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            code: bounded_text("category code", code.into(), MAX_CODE_LENGTH)?,
            name: bounded_text("category name", name.into(), MAX_NAME_LENGTH)?,
        })
    }

    /// Short code unique within the parent level.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Top-level category owned by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCategory {
    id: SystemCategoryId,
    project_id: ProjectId,
    label: CategoryLabel,
}

impl SystemCategory {
    /// Creates a system category with a fresh identifier.
    #[must_use]
    pub fn new(project_id: ProjectId, label: CategoryLabel) -> Self {
        Self::from_parts(SystemCategoryId::new(), project_id, label)
    }

    /// Reconstructs a persisted system category.
    #[must_use]
    pub const fn from_parts(
        id: SystemCategoryId,
        project_id: ProjectId,
        label: CategoryLabel,
    ) -> Self {
        Self {
            id,
            project_id,
            label,
        }
    }

    /// Category identifier.
    #[must_use]
    pub const fn id(&self) -> SystemCategoryId {
        self.id
    }

    /// Owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Code and name.
    #[must_use]
    pub const fn label(&self) -> &CategoryLabel {
        &self.label
    }
}

/// Second-level category nested under a system category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorCategory {
    id: MajorCategoryId,
    system_category_id: SystemCategoryId,
    label: CategoryLabel,
}

impl MajorCategory {
    /// Creates a major category with a fresh identifier.
    #[must_use]
    pub fn new(system_category_id: SystemCategoryId, label: CategoryLabel) -> Self {
        Self::from_parts(MajorCategoryId::new(), system_category_id, label)
    }

    /// Reconstructs a persisted major category.
    #[must_use]
    pub const fn from_parts(
        id: MajorCategoryId,
        system_category_id: SystemCategoryId,
        label: CategoryLabel,
    ) -> Self {
        Self {
            id,
            system_category_id,
            label,
        }
    }

    /// Category identifier.
    #[must_use]
    pub const fn id(&self) -> MajorCategoryId {
        self.id
    }

    /// Owning system category.
    #[must_use]
    pub const fn system_category_id(&self) -> SystemCategoryId {
        self.system_category_id
    }

    /// Code and name.
    #[must_use]
    pub const fn label(&self) -> &CategoryLabel {
        &self.label
    }
}

/// Third-level category nested under a major category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorCategory {
    id: MinorCategoryId,
    major_category_id: MajorCategoryId,
    label: CategoryLabel,
}

impl MinorCategory {
    /// Creates a minor category with a fresh identifier.
    #[must_use]
    pub fn new(major_category_id: MajorCategoryId, label: CategoryLabel) -> Self {
        Self::from_parts(MinorCategoryId::new(), major_category_id, label)
    }

    /// Reconstructs a persisted minor category.
    #[must_use]
    pub const fn from_parts(
        id: MinorCategoryId,
        major_category_id: MajorCategoryId,
        label: CategoryLabel,
    ) -> Self {
        Self {
            id,
            major_category_id,
            label,
        }
    }

    /// Category identifier.
    #[must_use]
    pub const fn id(&self) -> MinorCategoryId {
        self.id
    }

    /// Owning major category.
    #[must_use]
    pub const fn major_category_id(&self) -> MajorCategoryId {
        self.major_category_id
    }

    /// Code and name.
    #[must_use]
    pub const fn label(&self) -> &CategoryLabel {
        &self.label
    }
}

/// Category references carried on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryAssignment {
    /// System category reference.
    pub system: Option<SystemCategoryId>,
    /// Major category reference.
    pub major: Option<MajorCategoryId>,
    /// Minor category reference.
    pub minor: Option<MinorCategoryId>,
}

impl CategoryAssignment {
    /// Returns `true` when no level is assigned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.system.is_none() && self.major.is_none() && self.minor.is_none()
    }
}

/// Category masters loaded for the references on a task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedCategories {
    /// Loaded system category.
    pub system: Option<SystemCategory>,
    /// Loaded major category.
    pub major: Option<MajorCategory>,
    /// Loaded minor category.
    pub minor: Option<MinorCategory>,
}
