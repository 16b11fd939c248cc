//! In-memory fakes for the filesystem and process capabilities.

use crate::release::{
    error::Result,
    utils::{CommandRunner, EntryKind, Exit, FileSystem, Invocation},
};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    File,
    Dir,
}

/// Filesystem tree held in memory.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    locked: Mutex<HashSet<PathBuf>>,
    created: Mutex<usize>,
}

impl MemoryFs {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.nodes
            .lock()
            .unwrap()
            .insert(PathBuf::from("/"), Node::Dir);
        fs
    }

    /// Adds a directory and any missing parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.nodes.lock().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    /// Adds a file, creating missing parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Node::File);
    }

    /// Makes every removal of `path` fail with `PermissionDenied`.
    pub fn lock(&self, path: impl AsRef<Path>) {
        self.locked
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.lock().unwrap().contains_key(path.as_ref())
    }

    /// Number of directories created through [`FileSystem::create_dir`].
    pub fn created_dirs(&self) -> usize {
        *self.created.lock().unwrap()
    }

    fn children(nodes: &BTreeMap<PathBuf, Node>, path: &Path) -> Vec<PathBuf> {
        nodes
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .cloned()
            .collect()
    }
}

impl FileSystem for MemoryFs {
    async fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .get(path)
            .map(|node| match node {
                Node::File => EntryKind::File,
                Node::Dir => EntryKind::Directory,
            }))
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes.lock().unwrap();
        match nodes.get(path) {
            Some(Node::Dir) => return Ok(()),
            Some(Node::File) => return Err(io::ErrorKind::AlreadyExists.into()),
            None => {}
        }
        let parent_is_dir = path
            .parent()
            .is_some_and(|parent| nodes.get(parent) == Some(&Node::Dir));
        if !parent_is_dir {
            return Err(io::ErrorKind::NotFound.into());
        }
        nodes.insert(path.to_path_buf(), Node::Dir);
        *self.created.lock().unwrap() += 1;
        Ok(())
    }

    async fn list_entries(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let nodes = self.nodes.lock().unwrap();
        match nodes.get(path) {
            Some(Node::Dir) => Ok(Self::children(&nodes, path)),
            Some(Node::File) => Err(io::ErrorKind::NotADirectory.into()),
            None => Err(io::ErrorKind::NotFound.into()),
        }
    }

    async fn remove_entry(&self, path: &Path) -> io::Result<()> {
        if self.locked.lock().unwrap().contains(path) {
            return Err(io::ErrorKind::PermissionDenied.into());
        }
        let mut nodes = self.nodes.lock().unwrap();
        match nodes.get(path) {
            None => Err(io::ErrorKind::NotFound.into()),
            Some(Node::Dir) if !Self::children(&nodes, path).is_empty() => {
                Err(io::ErrorKind::DirectoryNotEmpty.into())
            }
            Some(_) => {
                nodes.remove(path);
                Ok(())
            }
        }
    }
}

/// What the fake build tool does for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Exit 0 and write the artifact.
    Produce,
    /// Exit 0 without writing anything.
    SucceedWithoutArtifact,
    /// Exit with the given nonzero code.
    Fail(i32),
}

/// A build invocation as seen by [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedBuild {
    pub configuration: String,
    pub out_dir: PathBuf,
    /// Entries present in `out_dir` when the build started
    pub entries_at_start: Vec<PathBuf>,
}

/// Fake build/packaging tools writing into a [`MemoryFs`].
///
/// Invocations whose program is `build_tool` are treated as builds and
/// parsed for `-p:Configuration=<name>;OutDir=<dir>`; anything else is the
/// packaging tool.
pub struct ScriptedRunner<'a> {
    fs: &'a MemoryFs,
    build_tool: PathBuf,
    artifact: String,
    outcomes: HashMap<String, BuildOutcome>,
    packaging_exit: i32,
    builds: Mutex<Vec<ObservedBuild>>,
    packaging: Mutex<Vec<Invocation>>,
}

impl<'a> ScriptedRunner<'a> {
    pub fn new(fs: &'a MemoryFs, build_tool: impl Into<PathBuf>, artifact: &str) -> Self {
        Self {
            fs,
            build_tool: build_tool.into(),
            artifact: artifact.to_string(),
            outcomes: HashMap::new(),
            packaging_exit: 0,
            builds: Mutex::new(Vec::new()),
            packaging: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the outcome for `configuration` (default: [`BuildOutcome::Produce`]).
    pub fn outcome(mut self, configuration: &str, outcome: BuildOutcome) -> Self {
        self.outcomes.insert(configuration.to_string(), outcome);
        self
    }

    pub fn packaging_exit(mut self, code: i32) -> Self {
        self.packaging_exit = code;
        self
    }

    pub fn builds(&self) -> Vec<ObservedBuild> {
        self.builds.lock().unwrap().clone()
    }

    pub fn packaging_calls(&self) -> Vec<Invocation> {
        self.packaging.lock().unwrap().clone()
    }

    fn parse_properties(invocation: &Invocation) -> (String, PathBuf) {
        let properties = invocation
            .arguments()
            .iter()
            .find_map(|arg| arg.to_str()?.strip_prefix("-p:"))
            .expect("build invocation without -p: properties");
        let (configuration, out_dir) = properties
            .strip_prefix("Configuration=")
            .and_then(|rest| rest.split_once(";OutDir="))
            .expect("malformed build properties");
        (configuration.to_string(), PathBuf::from(out_dir))
    }
}

impl CommandRunner for ScriptedRunner<'_> {
    async fn run(&self, invocation: &Invocation) -> Result<Exit> {
        if invocation.program() != self.build_tool {
            self.packaging.lock().unwrap().push(invocation.clone());
            return Ok(Exit::code(self.packaging_exit));
        }

        let (configuration, out_dir) = Self::parse_properties(invocation);
        let entries_at_start = self.fs.list_entries(&out_dir).await.unwrap_or_default();
        self.builds.lock().unwrap().push(ObservedBuild {
            configuration: configuration.clone(),
            out_dir: out_dir.clone(),
            entries_at_start,
        });

        match self
            .outcomes
            .get(&configuration)
            .copied()
            .unwrap_or(BuildOutcome::Produce)
        {
            BuildOutcome::Produce => {
                self.fs.add_file(out_dir.join(&self.artifact));
                Ok(Exit::code(0))
            }
            BuildOutcome::SucceedWithoutArtifact => Ok(Exit::code(0)),
            BuildOutcome::Fail(code) => Ok(Exit::code(code)),
        }
    }
}
