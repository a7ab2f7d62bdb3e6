//! Simulation harness for circuit breakers
