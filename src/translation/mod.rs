/*!
 * Translation scheduling.
 *
 * - `queue`: single-worker queue that serializes provider requests
 */

pub use self::queue::{CompletedJob, TranslationJob, TranslationQueue};

pub mod queue;
