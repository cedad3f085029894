/*! # `satchel`

A client-side state core for a tagged-content catalog.

## Purpose

`satchel` holds the working set of named text entries you get back from a
remote catalog service, keeps it in sync through create/read/update/delete,
and maintains two derived views on top of it:

- the **filtered collection**, driven by a free-text search term plus a set
  of selected tag filters, and
- the **tag universe**, the set of every distinct tag across the full
  collection.

The remote service owns persistence and search ranking. This crate owns the
rules for reconciling local state with whatever the service sends back,
including applying overlapping search responses in the order they were
*issued*, not the order they happened to arrive.

## What it doesn't do

No rendering, no transport-level retries, no multi-client sync. The service
is consumed through the [`remote::CatalogService`] trait; bring your own
implementation or use the bundled [`remote::HttpCatalog`].
*/

pub mod config;
pub mod error;
pub mod models;
pub mod remote;
pub mod search;
pub mod store;
pub mod validate;
