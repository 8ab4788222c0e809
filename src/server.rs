use std::sync::Arc;

use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*, tool,
    tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};

use crate::client::OpenAlexClient;
use crate::config::Config;
use crate::download;
use crate::tools::{
    self, DownloadPaperParams, GetAuthorProfileParams, GetCitationsParams, GetWorkDetailsParams,
    SearchAuthorsParams, SearchInstitutionsParams, SearchSourcesParams, SearchWorksParams,
};

/// MCP server fronting the OpenAlex API with text tools.
#[derive(Clone)]
pub struct OpenAlexServer {
    tool_router: ToolRouter<Self>,
    config: Arc<Config>,
    client: Arc<OpenAlexClient>,
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl OpenAlexServer {
    pub fn new(config: Config) -> Self {
        let client = OpenAlexClient::new(&config);

        tracing::info!(
            "Initialized OpenAlex client, polite_pool={}, max_concurrent={}",
            config.polite_pool(),
            config.max_concurrent_requests
        );

        Self {
            tool_router: Self::tool_router(),
            config: Arc::new(config),
            client: Arc::new(client),
        }
    }

    #[tool(description = "Search for scholarly works (papers, articles, books) in OpenAlex")]
    pub async fn search_works(
        &self,
        Parameters(params): Parameters<SearchWorksParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(tools::search_works(&self.client, &self.config, &params).await)
    }

    #[tool(description = "Search for authors/researchers in OpenAlex")]
    pub async fn search_authors(
        &self,
        Parameters(params): Parameters<SearchAuthorsParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(tools::search_authors(&self.client, &self.config, &params).await)
    }

    #[tool(description = "Search for academic institutions in OpenAlex")]
    pub async fn search_institutions(
        &self,
        Parameters(params): Parameters<SearchInstitutionsParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(tools::search_institutions(&self.client, &self.config, &params).await)
    }

    #[tool(description = "Search for journals, conferences, and other publication venues in OpenAlex")]
    pub async fn search_sources(
        &self,
        Parameters(params): Parameters<SearchSourcesParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(tools::search_sources(&self.client, &self.config, &params).await)
    }

    #[tool(description = "Get detailed information about a specific work by its OpenAlex ID or DOI")]
    pub async fn get_work_details(
        &self,
        Parameters(params): Parameters<GetWorkDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(tools::get_work_details(&self.client, &params).await)
    }

    #[tool(description = "Get detailed profile information about a specific author by their OpenAlex ID or ORCID")]
    pub async fn get_author_profile(
        &self,
        Parameters(params): Parameters<GetAuthorProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(tools::get_author_profile(&self.client, &params).await)
    }

    #[tool(description = "Get works that cite a specific work, useful for citation analysis")]
    pub async fn get_citations(
        &self,
        Parameters(params): Parameters<GetCitationsParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(tools::get_citations(&self.client, &self.config, &params).await)
    }

    #[tool(description = "Download a paper's PDF if available through open access")]
    pub async fn download_paper(
        &self,
        Parameters(params): Parameters<DownloadPaperParams>,
    ) -> Result<CallToolResult, McpError> {
        text_result(download::download_paper(&self.client, &params).await)
    }
}

#[tool_handler]
impl ServerHandler for OpenAlexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Search scholarly works, authors, institutions, and publication \
                 venues via the OpenAlex API. Look up work details and citation \
                 links by OpenAlex ID, DOI, or ORCID, and download open-access \
                 PDFs."
                    .into(),
            ),
        }
    }
}
