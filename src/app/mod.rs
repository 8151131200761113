// Application layer: the two pipelines wired from domain ports and core logic.

pub mod pipelines;
