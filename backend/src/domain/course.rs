//! Course data model.
//!
//! A course is a named record with an identifier assigned by the
//! persistence layer. The JSON wire form is `{"id": "<uuid>", "name": "..."}`
//! and is produced through [`CourseDto`] so encoding and decoding stay
//! explicit and validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed length for a course name, in characters.
pub const COURSE_NAME_MAX: usize = 256;

/// Validation errors raised by the course constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier is not a canonical UUID.
    InvalidId,
    /// The name is empty or only whitespace.
    BlankName,
    /// The name contains a NUL character.
    NameContainsNul,
    /// The trimmed name is longer than `max` characters.
    NameTooLong { max: usize },
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "course id must not be empty"),
            Self::InvalidId => write!(f, "course id must be a valid UUID"),
            Self::BlankName => write!(f, "course name must not be blank"),
            Self::NameContainsNul => write!(f, "course name must not contain null characters"),
            Self::NameTooLong { max } => {
                write!(f, "course name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Stable course identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(Uuid);

impl CourseId {
    /// Validate and construct a [`CourseId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, CourseValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(CourseValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(CourseValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| CourseValidationError::InvalidId)
    }

    /// Wrap a UUID produced by the persistence layer.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = CourseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for CourseId {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable course name, stored without surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    /// Trim, validate and construct a [`CourseName`].
    ///
    /// The length limit applies to the trimmed value.
    ///
    /// # Examples
    /// ```
    /// use courses_api::domain::CourseName;
    ///
    /// let name = CourseName::new("  Go  ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Go");
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, CourseValidationError> {
        let raw = name.into();
        let name = raw.trim();
        if name.is_empty() {
            return Err(CourseValidationError::BlankName);
        }
        if name.contains('\0') {
            return Err(CourseValidationError::NameContainsNul);
        }
        if name.chars().count() > COURSE_NAME_MAX {
            return Err(CourseValidationError::NameTooLong {
                max: COURSE_NAME_MAX,
            });
        }
        Ok(Self(name.to_owned()))
    }
}

impl AsRef<str> for CourseName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CourseName> for String {
    fn from(value: CourseName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseName {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted course record.
///
/// ## Invariants
/// - `id` is assigned by the repository and never changes.
/// - `name` satisfies [`CourseName`] validation.
///
/// # Examples
/// ```
/// use courses_api::domain::Course;
///
/// let course = Course::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "Python")
///     .expect("valid course");
/// let json = serde_json::to_value(&course).expect("serialise");
/// assert_eq!(json["name"], "Python");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourseDto", into = "CourseDto")]
pub struct Course {
    id: CourseId,
    name: CourseName,
}

impl Course {
    /// Build a course from validated components.
    pub fn new(id: CourseId, name: CourseName) -> Self {
        Self { id, name }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
    ) -> Result<Self, CourseValidationError> {
        Ok(Self::new(CourseId::new(id)?, CourseName::new(name)?))
    }

    /// Stable course identifier.
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    /// Course name.
    pub fn name(&self) -> &CourseName {
        &self.name
    }

    /// Return a copy with `changes` applied; absent fields keep their value.
    #[must_use]
    pub fn apply(&self, changes: &CourseChanges) -> Self {
        Self {
            id: self.id,
            name: changes.name.clone().unwrap_or_else(|| self.name.clone()),
        }
    }
}

/// Wire representation of a [`Course`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDto {
    pub id: String,
    pub name: String,
}

impl From<Course> for CourseDto {
    fn from(value: Course) -> Self {
        let Course { id, name } = value;
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl TryFrom<CourseDto> for Course {
    type Error = CourseValidationError;

    fn try_from(value: CourseDto) -> Result<Self, Self::Error> {
        Course::try_from_strings(value.id, value.name)
    }
}

/// Fields supplied when creating a course; the id comes from the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: CourseName,
}

impl CourseDraft {
    /// Draft for a course called `name`.
    pub fn new(name: CourseName) -> Self {
        Self { name }
    }
}

/// Partial update of a course. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<CourseName>,
}

impl CourseChanges {
    /// Changes that set the name.
    pub fn rename(name: CourseName) -> Self {
        Self { name: Some(name) }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Exact-match list filter. Criteria combine with logical AND.
///
/// Name matching is case-sensitive and compares the full value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub id: Option<CourseId>,
    pub name: Option<String>,
}

impl CourseFilter {
    /// Filter that matches every course.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to the course with `id`.
    #[must_use]
    pub fn with_id(mut self, id: CourseId) -> Self {
        self.id = Some(id);
        self
    }

    /// Restrict to courses named exactly `name`.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether `course` satisfies every criterion.
    pub fn matches(&self, course: &Course) -> bool {
        let id_matches = self.id.as_ref().is_none_or(|id| course.id() == id);
        let name_matches = self
            .name
            .as_deref()
            .is_none_or(|name| course.name().as_ref() == name);
        id_matches && name_matches
    }
}
