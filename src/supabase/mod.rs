// Supabase backend adapter — post fetching and user-name resolution.
//
// All reads go through PostgREST with the anon key. Each submodule
// handles one table of the backend surface the map needs.

pub mod client;
pub mod posts;
pub mod users;
