//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use autocommit::error::{GitError, LlmError, PromptError};
use autocommit::git::{GitOutput, Vcs};
use autocommit::llm::{CompletionClient, CompletionRequest};
use autocommit::ui::Prompter;

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A well-formed model response carrying `message`.
pub fn message_json(message: &str) -> String {
    serde_json::json!({ "message": message }).to_string()
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new git repository with a committer identity configured.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("Failed to disable signing");

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` in the work tree.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Add `name` to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index with git2. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit at HEAD.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or_default().to_string())
            .expect("Failed to read HEAD commit")
    }
}

/// [`Vcs`] with canned results that records every commit request.
pub struct FakeVcs {
    pub diff: GitOutput,
    pub commit_result: GitOutput,
    pub diff_calls: Cell<usize>,
    pub commits: RefCell<Vec<String>>,
}

impl FakeVcs {
    /// Staged diff succeeds with `stdout`; commits succeed.
    pub fn with_diff(stdout: &str) -> Self {
        Self {
            diff: GitOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
            commit_result: GitOutput {
                success: true,
                stdout: "[main abc1234] message\n 1 file changed".to_string(),
                stderr: String::new(),
            },
            diff_calls: Cell::new(0),
            commits: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_diff(stderr: &str) -> Self {
        let mut vcs = Self::with_diff("");
        vcs.diff = GitOutput {
            success: false,
            stdout: String::new(),
            stderr: stderr.to_string(),
        };
        vcs
    }

    pub fn failing_commit(mut self, stderr: &str) -> Self {
        self.commit_result = GitOutput {
            success: false,
            stdout: String::new(),
            stderr: stderr.to_string(),
        };
        self
    }

    pub fn committed(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }
}

impl Vcs for FakeVcs {
    fn diff_staged(&self) -> Result<GitOutput, GitError> {
        self.diff_calls.set(self.diff_calls.get() + 1);
        Ok(self.diff.clone())
    }

    fn commit(&self, message: &str) -> Result<GitOutput, GitError> {
        self.commits.borrow_mut().push(message.to_string());
        Ok(self.commit_result.clone())
    }
}

/// Completion client that replays scripted responses and records requests.
///
/// Panics on a call with no scripted response left.
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a well-formed `{"message": ...}` response.
    pub fn message(self, message: &str) -> Self {
        self.raw(&message_json(message))
    }

    /// Queue a raw response body.
    pub fn raw(self, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(body.to_string()));
        self
    }

    /// Queue a request failure.
    pub fn error(self, error: LlmError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected completion call #{}", self.call_count()))
    }
}

/// Prompter that answers from queues and records what it was shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub selections: VecDeque<Option<usize>>,
    pub confirmations: VecDeque<bool>,
    pub shown: Vec<Vec<String>>,
    /// `(prompt, default)` for every picker call.
    pub select_prompts: Vec<(String, usize)>,
    /// `(prompt, default)` for every confirmation.
    pub confirm_prompts: Vec<(String, bool)>,
    pub confirm_calls: usize,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(mut self, index: usize) -> Self {
        self.selections.push_back(Some(index));
        self
    }

    pub fn back_out(mut self) -> Self {
        self.selections.push_back(None);
        self
    }

    pub fn answer_save(mut self, answer: bool) -> Self {
        self.confirmations.push_back(answer);
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, PromptError> {
        self.shown.push(items.to_vec());
        self.select_prompts.push((prompt.to_string(), default));
        Ok(self
            .selections
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected picker call #{}", self.shown.len())))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        self.confirm_calls += 1;
        self.confirm_prompts.push((prompt.to_string(), default));
        Ok(self
            .confirmations
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected confirm call #{}", self.confirm_calls)))
    }
}
