//! Shared test doubles: a fake page with entry nodes, fake target and source
//! sites, and a list store that counts writes.

use entrylist::context::default_decision;
use entrylist::{
    by_id, by_name, Decision, EngineConfig, Engine, EntryHandle, EntryKey, EntryLocator,
    EntryMarks, Identity, IdentityLookup, KvListStore, List, ListStore, Lists, Membership,
    MemoryBackend, PageType, ProcessingType, SourceSite, StorageError, TargetSite,
    ToggleWiring, UserInfo, UserLookup, UserMapping,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Page node: an entry, or a control nested under one
#[derive(Clone, Debug)]
pub struct Node {
    pub id: u64,
    pub tag: &'static str,
    parent: Option<Box<Node>>,
    attached: Arc<AtomicBool>,
}

impl Node {
    pub fn entry(id: u64) -> Self {
        Self {
            id,
            tag: "entry",
            parent: None,
            attached: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn child(&self, id: u64, tag: &'static str) -> Self {
        Self {
            id,
            tag,
            parent: Some(Box::new(self.clone())),
            attached: Arc::clone(&self.attached),
        }
    }

    /// Remove the node (and its children) from the page
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }
}

impl EntryHandle for Node {
    fn key(&self) -> EntryKey {
        EntryKey(self.id)
    }

    fn parent(&self) -> Option<Self> {
        self.parent.as_deref().cloned()
    }

    fn matches(&self, selector: &str) -> bool {
        self.tag == selector
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

/// Observable page state, shared between a test and its fake target
#[derive(Default)]
pub struct Page {
    pub entries: Vec<Node>,
    pub identities: HashMap<u64, Identity>,
    pub not_ready: HashSet<u64>,
    pub rejected: HashSet<u64>,
    pub applied: Vec<(u64, String)>,
    pub reversed: Vec<(u64, String)>,
    pub mutated: Vec<u64>,
    pub setups: Vec<(PageType, bool)>,
    /// Toggle button wired inside each entry, by entry id
    pub buttons: HashMap<u64, Node>,
}

pub type SharedPage = Arc<Mutex<Page>>;

impl Page {
    pub fn shared() -> SharedPage {
        Arc::new(Mutex::new(Page::default()))
    }

    /// Add an entry with an identity
    pub fn add(&mut self, node_id: u64, id: &str, name: &str) -> Node {
        let node = Node::entry(node_id);
        self.entries.push(node.clone());
        self.identities.insert(node_id, Identity::new(id, name));
        node
    }
}

pub type Policy = Box<dyn Fn(&Membership) -> Decision + Send>;

pub struct FakeTarget {
    pub name: String,
    pub page: SharedPage,
    pub user: UserLookup,
    pub interval: Option<Duration>,
    pub entry_page: bool,
    pub page_type: Option<PageType>,
    pub extracts_identity: bool,
    pub policy: Option<Policy>,
    pub toggle: Option<(EntryLocator, Option<String>, Option<ProcessingType>)>,
}

impl FakeTarget {
    pub fn new(name: &str, page: &SharedPage) -> Self {
        Self {
            name: name.to_string(),
            page: Arc::clone(page),
            user: UserLookup::NoUserConcept,
            interval: None,
            entry_page: true,
            page_type: None,
            extracts_identity: true,
            policy: None,
            toggle: None,
        }
    }

    pub fn with_user(mut self, user: UserLookup) -> Self {
        self.user = user;
        self
    }

    pub fn with_policy(mut self, policy: impl Fn(&Membership) -> Decision + Send + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Wire a button inside every entry
    pub fn with_toggle(mut self, locator: EntryLocator, list: Option<&str>, toggle_type: Option<&str>) -> Self {
        self.toggle = Some((
            locator,
            list.map(str::to_string),
            toggle_type.and_then(ProcessingType::new),
        ));
        self
    }
}

impl TargetSite for FakeTarget {
    type Entry = Node;

    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&mut self) -> Vec<Node> {
        self.page.lock().entries.clone()
    }

    fn apply_effect(&mut self, entry: &Node, _identity: Option<&Identity>, processing: &ProcessingType) {
        self.page.lock().applied.push((entry.id, processing.to_string()));
    }

    fn interval(&self) -> Option<Duration> {
        self.interval
    }

    fn is_entry_page(&self) -> bool {
        self.entry_page
    }

    fn page_type(&self) -> Option<PageType> {
        self.page_type
    }

    fn on_page_setup(&mut self, page_type: PageType, is_entry_page: bool) {
        self.page.lock().setups.push((page_type, is_entry_page));
    }

    fn is_valid_entry(&mut self, entry: &Node, marks: &mut EntryMarks<'_, Node>) -> bool {
        let page = self.page.lock();
        if page.rejected.contains(&entry.id) {
            return marks.mark_invalid(entry);
        }
        !page.not_ready.contains(&entry.id)
    }

    fn extract_identity(&self, entry: &Node) -> IdentityLookup {
        if !self.extracts_identity {
            return IdentityLookup::NotExtracted;
        }
        match self.page.lock().identities.get(&entry.id) {
            Some(identity) => IdentityLookup::Found(identity.clone()),
            None => IdentityLookup::Missing,
        }
    }

    fn mutate_entry(&mut self, entry: &Node, wiring: &mut ToggleWiring<'_, Node>) {
        let mut page = self.page.lock();
        page.mutated.push(entry.id);
        if let Some((locator, list, toggle_type)) = &self.toggle {
            let button = entry.child(entry.id * 1000 + 1, "button");
            wiring.attach(&button, locator.clone(), list.as_deref(), toggle_type.clone());
            page.buttons.insert(entry.id, button);
        }
    }

    fn decide(&self, membership: &Membership, _identity: Option<&Identity>, _entry: &Node) -> Decision {
        match &self.policy {
            Some(policy) => policy(membership),
            None => default_decision(membership),
        }
    }

    fn reverse_effect(&mut self, entry: &Node, _identity: &Identity, processing: &ProcessingType) {
        self.page.lock().reversed.push((entry.id, processing.to_string()));
    }

    fn get_user(&self) -> UserLookup {
        self.user.clone()
    }
}

pub struct FakeSource {
    pub name: String,
    pub user: UserLookup,
    pub mapping: UserMapping,
    pub page_type: Option<PageType>,
    pub match_by_name: bool,
    pub setups: Arc<Mutex<Vec<(PageType, bool)>>>,
}

impl FakeSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            user: UserLookup::NoUserConcept,
            mapping: UserMapping::LastRemembered,
            page_type: None,
            match_by_name: false,
            setups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn mapped_to(mut self, user: &str) -> Self {
        self.mapping = UserMapping::Mapped(UserInfo::new(user));
        self
    }

    pub fn by_name(mut self) -> Self {
        self.match_by_name = true;
        self
    }
}

impl SourceSite for FakeSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_user(&self) -> UserLookup {
        self.user.clone()
    }

    fn map_user_from_target(&self, _target_name: &str, _target_user: &str) -> UserMapping {
        self.mapping.clone()
    }

    fn page_type(&self) -> Option<PageType> {
        self.page_type
    }

    fn on_page_setup(&mut self, page_type: PageType, is_entry_page: bool) {
        self.setups.lock().push((page_type, is_entry_page));
    }

    fn test_membership(&self, identity: &Identity, list: &List) -> bool {
        if self.match_by_name {
            by_name(identity, list)
        } else {
            by_id(identity, list)
        }
    }
}

/// In-memory list store counting `save` calls; writes can be made to fail
pub struct CountingStore {
    inner: KvListStore<MemoryBackend>,
    saves: AtomicUsize,
    failing_writes: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: KvListStore::new(MemoryBackend::new()),
            saves: AtomicUsize::new(0),
            failing_writes: AtomicBool::new(false),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(StorageError::IoError(std::io::Error::other("disk full")));
        }
        Ok(())
    }
}

impl ListStore for CountingStore {
    fn load(&self, site: &str, user: &str) -> Lists {
        self.inner.load(site, user)
    }

    fn save(&self, site: &str, user: &str, list_name: &str, list: &List) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.inner.save(site, user, list_name, list)
    }

    fn delete_one(&self, site: &str, user: &str, list_name: &str) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.delete_one(site, user, list_name)
    }

    fn delete_all(&self, site: &str, user: &str) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.delete_all(site, user)
    }

    fn list_names(&self, site: &str, user: &str) -> Vec<String> {
        self.inner.list_names(site, user)
    }

    fn remember_user(&self, site: &str, user: &UserInfo) -> Result<(), StorageError> {
        self.inner.remember_user(site, user)
    }

    fn recall_user(&self, site: &str) -> Option<UserInfo> {
        self.inner.recall_user(site)
    }
}

pub fn memory_store() -> Arc<KvListStore<MemoryBackend>> {
    Arc::new(KvListStore::new(MemoryBackend::new()))
}

pub fn list(entries: &[(&str, &str)]) -> List {
    entries
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

pub fn pt(label: &str) -> ProcessingType {
    ProcessingType::new(label).unwrap()
}

pub fn engine(target: FakeTarget, store: Arc<dyn ListStore>) -> Engine<FakeTarget> {
    Engine::register_target(target, store, EngineConfig::default()).unwrap()
}
