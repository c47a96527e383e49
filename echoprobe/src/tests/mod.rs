
// Adapter tests
mod adapter;


// Reporter tests
mod report;
