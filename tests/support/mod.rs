pub mod redirection;
pub mod socket_guard;

/// Generates one `#[tokio::test]` per [`TransportPreference`] for every
/// listed case. Each case is an `async fn(HttpClient)` in the invoking file,
/// and the generated tests land in `auto`, `http1_only` and
/// `http2_prior_knowledge` submodules.
///
/// [`TransportPreference`]: fetcher_core::TransportPreference
#[allow(unused_macros)]
macro_rules! transport_tests {
    ($($case:ident),+ $(,)?) => {
        mod auto {
            transport_tests!(@cases Auto; $($case),+);
        }
        mod http1_only {
            transport_tests!(@cases Http1Only; $($case),+);
        }
        mod http2_prior_knowledge {
            transport_tests!(@cases Http2PriorKnowledge; $($case),+);
        }
    };
    (@cases $transport:ident; $($case:ident),+) => {
        $(
            #[tokio::test]
            async fn $case() {
                super::$case(fetcher_core::HttpClient::with_transport(
                    fetcher_core::TransportPreference::$transport,
                ))
                .await;
            }
        )+
    };
}
