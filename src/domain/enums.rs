use std::fmt;
use std::str::FromStr;

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Label shown in the footer tabs
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// Check whether a task with the given completion state passes
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !completed,
            Filter::Completed => completed,
        }
    }

    /// Cycle to the next filter (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Active, Filter::Completed]
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(format!("unknown filter '{}' (expected all, active or completed)", other)),
        }
    }
}

/// Class of failure shown to the user; one message per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    /// Create rejected locally because the title was blank
    EmptyTitle,
    Create,
    Update,
    Delete,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Load => "Unable to load todos",
            ErrorKind::EmptyTitle => "Title should not be empty",
            ErrorKind::Create => "Unable to add a todo",
            ErrorKind::Update => "Unable to update a todo",
            ErrorKind::Delete => "Unable to delete a todo",
        }
    }
}

/// Which widget receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    NewTask,
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!("Active".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!("completed".parse::<Filter>(), Ok(Filter::Completed));
        assert_eq!("done".parse::<Filter>(), Ok(Filter::Completed));
        assert!("someday".parse::<Filter>().is_err());
    }

    #[test]
    fn test_filter_next_cycles() {
        assert_eq!(Filter::All.next(), Filter::Active);
        assert_eq!(Filter::Active.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn test_filter_matches() {
        assert!(Filter::All.matches(true));
        assert!(Filter::All.matches(false));
        assert!(Filter::Active.matches(false));
        assert!(!Filter::Active.matches(true));
        assert!(Filter::Completed.matches(true));
        assert!(!Filter::Completed.matches(false));
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let kinds = [
            ErrorKind::Load,
            ErrorKind::EmptyTitle,
            ErrorKind::Create,
            ErrorKind::Update,
            ErrorKind::Delete,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }
}
