//! Brigade: multi-agent task orchestration.
//!
//! A team of role-specialised agents executes tasks dispatched from
//! declarative workflows or from plans produced by a completion backend.
//! Agents share a message bus and a state store, and completion-backed
//! agents may call a fixed set of workspace tools.
//!
//! # Architecture
//!
//! Modules follow a hexagonal layout:
//!
//! - **Domain**: value types and invariants with no I/O
//! - **Ports**: traits at the seams (agents, completion gateways, tool hosts)
//! - **Adapters**: concrete implementations of ports (HTTP backends, local
//!   workspace tools, completion-backed agents)
//! - **Services**: orchestration over ports
//!
//! # Modules
//!
//! - [`task`]: task aggregate, metadata and outcomes
//! - [`message`]: in-process message bus with history
//! - [`state`]: shared state store and metrics
//! - [`completion`]: completion gateway port and backends
//! - [`tools`]: workspace tools and the tool loop
//! - [`agent`]: agent port and the completion-backed agent
//! - [`dispatch`]: agent registry and task dispatcher
//! - [`workflow`]: declarative workflows and their executor
//! - [`planning`]: requirement planning and plan execution
//! - [`config`]: environment-driven gateway configuration
//! - [`telemetry`]: log subscriber setup

pub mod agent;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod message;
pub mod planning;
pub mod state;
pub mod task;
pub mod telemetry;
pub mod tools;
pub mod workflow;
