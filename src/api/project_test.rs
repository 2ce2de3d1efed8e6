use super::*;
use std::sync::Mutex;

struct Directory {
    projects: Vec<Project>,
    fail_create: bool,
    calls: Mutex<Vec<String>>,
}

impl Directory {
    fn new(projects: &[(i64, &str)]) -> Self {
        let projects =
            projects.iter().map(|&(id, slug)| Project { id, name: slug.to_uppercase(), slug: slug.into() }).collect();
        Self { projects, fail_create: false, calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ProjectDirectory for Directory {
    async fn list_projects(&self, slug: Option<&str>) -> Result<Vec<Project>, ApiError> {
        self.calls.lock().unwrap().push(format!("list {}", slug.unwrap_or("*")));
        Ok(self.projects.iter().filter(|p| slug.is_none_or(|s| p.slug == s)).cloned().collect())
    }

    async fn create_project(&self, project: &NewProject<'_>) -> Result<Project, ApiError> {
        self.calls.lock().unwrap().push(format!("create {}", project.slug));
        if self.fail_create {
            return Err(ApiError::Response { status: 409, body: "slug taken".into() });
        }
        Ok(Project { id: 99, name: project.name.into(), slug: project.slug.into() })
    }
}

#[tokio::test]
async fn matching_slug_wins() {
    let dir = Directory::new(&[(1, "default"), (2, "roadmap")]);
    let project = resolve_or_create(&dir, Some("roadmap")).await.unwrap();
    assert_eq!(project, ProjectRef { id: 2, slug: "roadmap".into() });
    assert_eq!(dir.calls(), vec!["list roadmap"]);
}

#[tokio::test]
async fn unmatched_slug_falls_back_to_first_project() {
    let mut dir = Directory::new(&[(1, "default"), (2, "roadmap")]);
    dir.fail_create = true;
    let project = resolve_or_create(&dir, Some("missing")).await.unwrap();
    assert_eq!(project.id, 1);
    assert_eq!(dir.calls(), vec!["list missing", "list *"]);
}

#[tokio::test]
async fn no_hint_uses_first_project() {
    let dir = Directory::new(&[(4, "a"), (5, "b")]);
    assert_eq!(resolve_or_create(&dir, None).await.unwrap().id, 4);
    assert_eq!(dir.calls(), vec!["list *"]);
}

#[tokio::test]
async fn empty_service_creates_default_project() {
    let dir = Directory::new(&[]);
    let project = resolve_or_create(&dir, Some("anything")).await.unwrap();
    assert_eq!(project, ProjectRef { id: 99, slug: "default".into() });
    assert_eq!(dir.calls(), vec!["list anything", "list *", "create default"]);
}

#[tokio::test]
async fn create_failure_is_reported() {
    let mut dir = Directory::new(&[]);
    dir.fail_create = true;
    let err = resolve_or_create(&dir, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Response { status: 409, .. }));
}
