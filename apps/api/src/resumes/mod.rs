// Resume API
// Implements: extraction, reflow, lint, upload, current-document CRUD, analysis.
// The only module that performs I/O on behalf of the pipeline.

pub mod handlers;
