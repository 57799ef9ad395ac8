pub mod catalog_page;
pub mod detail_page;
pub mod pavilion_list;
pub mod pavilion_modal;
pub mod review_form;
pub mod reviews_list;
