//! Level 3: End-to-End Scenario Tests
