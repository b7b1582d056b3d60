pub mod pdf_pipeline;
