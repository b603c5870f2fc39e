//! Integration Tests Module
//!
//! End-to-end tests of the generation pipeline against scripted collaborators.
//! Tests cover requirements analysis, the correction/enhancement controller,
//! degraded and slow collaborators, cancellation, and the shared cache and
//! statistics.

// Scripted providers and fixtures
mod support;

// Analyzer, synthesis and aggregation properties
mod analyzer_test;

// Controller outcomes, timeouts and cancellation
mod pipeline_test;

// Farm marketplace walkthrough
mod scenario_test;

// Result cache and quality statistics
mod cache_test;
