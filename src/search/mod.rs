pub mod facets;
pub mod filter;

pub use facets::{compute_facets, similar_jobs, FacetCount, FacetStats, SalaryStats};
pub use filter::{
    filter_jobs, search_jobs, sort_jobs, FilterSpec, Page, Pagination, SortKey, MAX_PAGE_SIZE,
};
