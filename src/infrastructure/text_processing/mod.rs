mod composite_file_loader;
mod mock_file_loader;
mod pdf_adapter;
mod plain_text_adapter;
mod tesseract_image_adapter;

pub use composite_file_loader::CompositeFileLoader;
pub use mock_file_loader::MockFileLoader;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use tesseract_image_adapter::TesseractImageAdapter;
