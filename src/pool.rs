//! The machine pool: every usable host, tracked in three overlapping
//! queues (`all`, `ready`, `running`) over the same set of [`Host`]
//! entries.

use std::io::{self, BufRead, Read};

use crate::queue::{Index, Link, Linkable, QueueHead};

pub type HostId = Index;

const ALL: usize = 0;
const READY: usize = 1;
const RUNNING: usize = 2;
const QUEUE_COUNT: usize = 3;

/// One usable remote machine. A host is always a member of `all`, and of
/// exactly one of `ready` or `running`.
#[derive(Debug)]
pub struct Host {
    pub name: String,
    /// The child identifier of the instance currently bound to this host.
    /// Valid only while the host is in `running`.
    pub run_pid: Option<u32>,
    links: [Link; QUEUE_COUNT],
}

impl Linkable for Host {
    fn link(&self, queue: usize) -> Link {
        self.links[queue]
    }

    fn set_link(&mut self, queue: usize, link: Link) {
        self.links[queue] = link;
    }
}

/// Owns all hosts plus the queue control blocks over them.
#[derive(Debug, Default)]
pub struct MachinePool {
    hosts: Vec<Host>,
    all: QueueHead,
    ready: QueueHead,
    running: QueueHead,
}

impl MachinePool {
    pub fn new() -> Self {
        MachinePool::default()
    }

    /// Parses a machine list: one host name per line, trailing newline and
    /// surrounding whitespace stripped, blank lines and lines whose first
    /// non-blank byte is `#` skipped. Each accepted line is appended to
    /// both `all` and `ready`, in file order.
    pub fn parse<R: Read>(reader: R) -> io::Result<Self> {
        let mut pool = MachinePool::new();
        let buffered = io::BufReader::new(reader);
        for line in buffered.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            pool.push(trimmed.to_string());
        }
        Ok(pool)
    }

    pub fn from_names<I: IntoIterator<Item = String>>(names: I) -> Self {
        let mut pool = MachinePool::new();
        for name in names {
            pool.push(name);
        }
        pool
    }

    fn push(&mut self, name: String) {
        let idx = self.hosts.len();
        self.hosts.push(Host {
            name,
            run_pid: None,
            links: [Link::new(); QUEUE_COUNT],
        });
        self.all.add_tail(&mut self.hosts, ALL, idx);
        self.ready.add_tail(&mut self.hosts, READY, idx);
    }

    /// Total number of hosts, `|all|`.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn host(&self, id: HostId) -> &Host {
        &self.hosts[id]
    }

    pub fn host_mut(&mut self, id: HostId) -> &mut Host {
        &mut self.hosts[id]
    }

    /// Names in `all`, in file order.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.all.iter(&self.hosts, ALL).map(move |idx| self.hosts[idx].name.as_str())
    }

    /// Takes the host at the head of `ready`, moving it out of `ready`.
    /// The caller is responsible for adding it to `running`.
    pub fn take_ready(&mut self) -> Option<HostId> {
        self.ready.take_head(&mut self.hosts, READY)
    }

    pub fn ready_len(&self) -> usize {
        self.ready.iter(&self.hosts, READY).count()
    }

    pub fn add_running(&mut self, id: HostId) {
        self.running.add_tail(&mut self.hosts, RUNNING, id);
    }

    /// Moves a host from `running` back to the tail of `ready`.
    pub fn move_running_to_ready(&mut self, id: HostId) {
        self.running.remove(&mut self.hosts, RUNNING, id);
        self.ready.add_tail(&mut self.hosts, READY, id);
    }

    pub fn running_is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn running_ids(&self) -> impl Iterator<Item = HostId> + '_ {
        self.running.iter(&self.hosts, RUNNING)
    }

    /// Finds the host in `running` whose recorded child identifier equals
    /// `pid`, if any.
    pub fn find_running_by_pid(&self, pid: u32) -> Option<HostId> {
        self.running_ids().find(|&id| self.hosts[id].run_pid == Some(pid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_skips_blank_lines_and_comments() {
        let input = "hostA\n\n# a comment\n  hostB  \n\t\nhostC\n";
        let pool = MachinePool::parse(Cursor::new(input)).unwrap();
        assert_eq!(pool.all_names().collect::<Vec<_>>(), vec!["hostA", "hostB", "hostC"]);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn empty_input_yields_empty_pool() {
        let pool = MachinePool::parse(Cursor::new("\n# only comments\n\n")).unwrap();
        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn every_host_starts_in_all_and_ready() {
        let pool = MachinePool::from_names(["a".to_string(), "b".to_string()]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.ready_len(), 2);
        assert!(pool.running_is_empty());
    }

    #[test]
    fn take_ready_is_fifo() {
        let mut pool = MachinePool::from_names(["a".to_string(), "b".to_string(), "c".to_string()]);
        let first = pool.take_ready().unwrap();
        assert_eq!(pool.host(first).name, "a");
        let second = pool.take_ready().unwrap();
        assert_eq!(pool.host(second).name, "b");
    }

    #[test]
    fn ready_xor_running_holds_across_a_run_cycle() {
        let mut pool = MachinePool::from_names(["a".to_string(), "b".to_string()]);
        let id = pool.take_ready().unwrap();
        pool.add_running(id);
        assert_eq!(pool.ready_len(), 1);
        assert_eq!(pool.running_ids().count(), 1);

        pool.host_mut(id).run_pid = Some(4242);
        assert_eq!(pool.find_running_by_pid(4242), Some(id));

        pool.move_running_to_ready(id);
        assert_eq!(pool.ready_len(), 2);
        assert!(pool.running_is_empty());
    }

    #[test]
    fn recycled_host_returns_to_the_tail_of_ready() {
        let mut pool = MachinePool::from_names(["a".to_string(), "b".to_string()]);
        let a = pool.take_ready().unwrap();
        pool.add_running(a);
        let b = pool.take_ready().unwrap();
        pool.add_running(b);
        assert!(pool.take_ready().is_none());

        pool.move_running_to_ready(a);
        let next = pool.take_ready().unwrap();
        assert_eq!(next, a);
    }
}
