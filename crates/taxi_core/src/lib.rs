pub mod city;
pub mod clock;
pub mod config;
pub mod ecs;
pub mod error;
pub mod pricing;
pub mod runner;
pub mod session;
pub mod spatial;
pub mod spawner;
pub mod systems;
pub mod telemetry;
pub mod traffic;
