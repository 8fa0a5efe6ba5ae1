//! Emitters whose output does not depend on the draft.

use super::{EmitContext, Emitter};
use crate::error::ExportResult;

const NEXT_CONFIG: &str = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  output: 'export',
  trailingSlash: true,
  images: { unoptimized: true },
};

export default nextConfig;
"#;

const TAILWIND_CONFIG: &str = r#"import type { Config } from 'tailwindcss';

const config: Config = {
  content: ['./app/**/*.{ts,tsx}', './components/**/*.{ts,tsx}'],
  theme: {
    extend: {
      colors: {
        primary: 'var(--colors-primary)',
        background: 'var(--colors-background)',
        foreground: 'var(--colors-foreground)',
      },
      fontFamily: {
        heading: 'var(--fonts-heading)',
        body: 'var(--fonts-body)',
      },
      borderRadius: {
        DEFAULT: 'var(--geometry-radius)',
      },
    },
  },
  plugins: [],
};

export default config;
"#;

const ENTRY_PAGE: &str = r#"import './theme.css';

import SectionRenderer from '@/components/layout/SectionRenderer';
import content from '@/content/content.json';
import theme from '@/content/theme.json';

export default function Page() {
  return <SectionRenderer sections={theme.layout.sections} content={content} />;
}
"#;

/// `next.config.mjs`: static export.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildToolConfig;

impl Emitter for BuildToolConfig {
    fn relative_path(&self) -> &'static str {
        "next.config.mjs"
    }

    fn render(&self, _context: &EmitContext<'_>) -> ExportResult<String> {
        Ok(NEXT_CONFIG.to_string())
    }
}

/// `tailwind.config.ts`: maps utility names onto the theme variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StylingConfig;

impl Emitter for StylingConfig {
    fn relative_path(&self) -> &'static str {
        "tailwind.config.ts"
    }

    fn render(&self, _context: &EmitContext<'_>) -> ExportResult<String> {
        Ok(TAILWIND_CONFIG.to_string())
    }
}

/// `app/page.tsx`: hands the layout to the shared section renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryPage;

impl Emitter for EntryPage {
    fn relative_path(&self) -> &'static str {
        "app/page.tsx"
    }

    fn render(&self, _context: &EmitContext<'_>) -> ExportResult<String> {
        Ok(ENTRY_PAGE.to_string())
    }
}
