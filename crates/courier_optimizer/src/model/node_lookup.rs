use crate::problem::job::JobIdx;

use super::routing_model::NodeIdx;

/// Per-node requirements, computed once per solve and shared by the dimension transits
/// and the route extraction.
///
/// Values are what a vehicle has to serve when it *visits* the node. The sink holds zero
/// and no jobs, a start node only holds the jobs no vehicle could load at departure.
#[derive(Debug, Clone)]
pub struct NodeLookup {
    demands: Vec<i64>,
    service_times: Vec<i64>,
    jobs: Vec<Vec<JobIdx>>,
}

impl NodeLookup {
    pub fn with_nodes(num_nodes: usize) -> Self {
        NodeLookup {
            demands: vec![0; num_nodes],
            service_times: vec![0; num_nodes],
            jobs: vec![Vec::new(); num_nodes],
        }
    }

    pub(crate) fn add_job(&mut self, node: NodeIdx, job_id: JobIdx, demand: i64, service: i64) {
        self.demands[node.get()] += demand;
        self.service_times[node.get()] += service;
        self.jobs[node.get()].push(job_id);
    }

    #[inline(always)]
    pub fn demand(&self, node: NodeIdx) -> i64 {
        self.demands[node.get()]
    }

    #[inline(always)]
    pub fn service_time(&self, node: NodeIdx) -> i64 {
        self.service_times[node.get()]
    }

    #[inline(always)]
    pub fn jobs(&self, node: NodeIdx) -> &[JobIdx] {
        &self.jobs[node.get()]
    }

    pub fn has_jobs(&self, node: NodeIdx) -> bool {
        !self.jobs[node.get()].is_empty()
    }
}
